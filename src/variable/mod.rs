//! Symbolic placeholders for parameters.
//!
//! A [`ParameterVariable`] mirrors the shape of a [`ParameterDefinition`]: every node,
//! leaf or object, renders as the `{{path}}` template expression for the runtime value
//! it stands in for. Object nodes can be navigated by property name, and untyped
//! objects accept any property name to unbounded depth.

mod object;

pub use object::ObjectVariable;

use crate::params::{ParameterDefinition, ParameterKind};
use crate::reference::PathReference;
use serde::{Serialize, Serializer};
use std::fmt;

/// A placeholder for a runtime value at a symbolic path.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterVariable {
    /// A primitive or array value. Not navigable.
    Leaf(PathReference),
    /// An object value, typed or untyped.
    Object(ObjectVariable),
}

impl ParameterVariable {
    /// Builds the placeholder tree for parameter `name` under `namespace`.
    ///
    /// Custom types are transparent: they resolve to their definition at the same path.
    pub fn build(namespace: &str, name: &str, definition: &ParameterDefinition) -> Self {
        match &definition.kind {
            ParameterKind::Custom(custom_type) => {
                Self::build(namespace, name, &custom_type.definition)
            }
            ParameterKind::TypedObject { properties, .. } => {
                let reference = PathReference::new([namespace, name]);
                let declared = properties
                    .iter()
                    .map(|(property, child)| {
                        (
                            property.clone(),
                            Self::build(reference.path(), property, child),
                        )
                    })
                    .collect();
                ParameterVariable::Object(ObjectVariable::with_declared(reference, declared))
            }
            ParameterKind::UntypedObject => ParameterVariable::Object(ObjectVariable::dynamic(
                PathReference::new([namespace, name]),
            )),
            ParameterKind::Primitive(_) | ParameterKind::Array { .. } => {
                ParameterVariable::Leaf(PathReference::new([namespace, name]))
            }
        }
    }

    pub fn reference(&self) -> &PathReference {
        match self {
            ParameterVariable::Leaf(reference) => reference,
            ParameterVariable::Object(object) => object.reference(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectVariable> {
        match self {
            ParameterVariable::Object(object) => Some(object),
            ParameterVariable::Leaf(_) => None,
        }
    }

    /// Navigates one property deeper. Leaves have no properties.
    pub fn get(&self, name: &str) -> Option<ParameterVariable> {
        self.as_object().map(|object| object.get(name))
    }

    /// Navigates a chain of properties. Fails only when the chain passes through a leaf.
    pub fn at(&self, names: &[&str]) -> Option<ParameterVariable> {
        names
            .iter()
            .try_fold(self.clone(), |variable, name| variable.get(name))
    }
}

impl From<ObjectVariable> for ParameterVariable {
    fn from(object: ObjectVariable) -> Self {
        ParameterVariable::Object(object)
    }
}

impl From<PathReference> for ParameterVariable {
    fn from(reference: PathReference) -> Self {
        ParameterVariable::Leaf(reference)
    }
}

impl fmt::Display for ParameterVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.reference(), f)
    }
}

impl Serialize for ParameterVariable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.reference().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_and_arrays_are_leaves() {
        let tags = ParameterDefinition::array(ParameterDefinition::string());
        let leaf = ParameterVariable::build("inputs", "tags", &tags);
        assert!(matches!(leaf, ParameterVariable::Leaf(_)));
        assert_eq!(leaf.to_string(), "{{inputs.tags}}");
        assert!(leaf.get("0").is_none());
    }

    #[test]
    fn empty_property_name_keeps_parent_path() {
        let definition =
            ParameterDefinition::typed_object().with_property("", ParameterDefinition::string());
        let variable = ParameterVariable::build("", "incident", &definition);
        let object = variable.as_object().unwrap();
        assert_eq!(object.declared("").unwrap().to_string(), "{{incident}}");
    }
}
