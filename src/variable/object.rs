use super::ParameterVariable;
use crate::params::ParameterSet;
use crate::reference::PathReference;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An object placeholder with optional declared properties and a dynamic fallback.
///
/// Declared properties always win. Any other name yields a fresh untyped node one
/// level deeper, so arbitrary paths such as `incident.foo.bar.baz` can be expressed.
/// Whether a shape is closed (`additionalProperties: false`) does not change this:
/// use [`ObjectVariable::declared`] for the declared-only view.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectVariable {
    reference: PathReference,
    declared: Arc<BTreeMap<String, ParameterVariable>>,
}

impl ObjectVariable {
    pub(super) fn with_declared(
        reference: PathReference,
        declared: BTreeMap<String, ParameterVariable>,
    ) -> Self {
        Self {
            reference,
            declared: Arc::new(declared),
        }
    }

    /// An untyped object node with no declared properties.
    pub fn dynamic(reference: PathReference) -> Self {
        Self::with_declared(reference, BTreeMap::new())
    }

    /// Builds the root node for a parameter set, e.g. a workflow's `inputs` or a
    /// step's `steps.<id>` outputs.
    pub fn from_set(namespace: &str, name: &str, set: &ParameterSet) -> Self {
        let reference = PathReference::new([namespace, name]);
        let declared = set
            .properties
            .iter()
            .map(|(property, definition)| {
                (
                    property.clone(),
                    ParameterVariable::build(reference.path(), property, definition),
                )
            })
            .collect();
        Self::with_declared(reference, declared)
    }

    pub fn reference(&self) -> &PathReference {
        &self.reference
    }

    /// Returns the declared property, or an untyped node at `path.name`.
    pub fn get(&self, name: &str) -> ParameterVariable {
        match self.declared.get(name) {
            Some(variable) => variable.clone(),
            None => ParameterVariable::Object(Self::dynamic(self.reference.child(name))),
        }
    }

    /// Navigates a chain of properties starting from this node.
    pub fn at(&self, names: &[&str]) -> Option<ParameterVariable> {
        match names.split_first() {
            None => Some(ParameterVariable::Object(self.clone())),
            Some((first, rest)) => self.get(first).at(rest),
        }
    }

    /// Returns a property only if it was declared.
    pub fn declared(&self, name: &str) -> Option<&ParameterVariable> {
        self.declared.get(name)
    }

    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.declared.keys().map(String::as_str)
    }

    /// True when no properties were declared.
    pub fn is_dynamic(&self) -> bool {
        self.declared.is_empty()
    }
}

impl fmt::Display for ObjectVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reference, f)
    }
}

impl Serialize for ObjectVariable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.reference.serialize(serializer)
    }
}
