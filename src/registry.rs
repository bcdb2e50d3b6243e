//! The registration graph.
//!
//! A [`ManifestRegistry`] is created fresh for every manifest export. Definitions
//! register themselves and everything reachable from them; the registry keeps one
//! entry per identifier, in registration order, and finally exports each entry into
//! its manifest section.

use crate::auth::OAuth2Provider;
use crate::datastores::DatastoreDefinition;
use crate::error::ManifestError;
use crate::functions::FunctionDefinition;
use crate::params::{ParameterDefinition, ParameterKind, ParameterSet};
use crate::types::CustomType;
use crate::workflows::WorkflowDefinition;
use ahash::AHashSet;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// An identifier-bearing definition that can be registered into a manifest.
pub trait ManifestEntity {
    /// Human-readable entity kind used in logs and errors.
    const KIND: &'static str;

    fn entity_id(&self) -> &str;
}

/// Ordered, identifier-deduplicated entries of one entity kind.
#[derive(Debug)]
struct EntitySet<T> {
    entries: Vec<Arc<T>>,
    ids: AHashSet<String>,
}

impl<T> Default for EntitySet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            ids: AHashSet::new(),
        }
    }
}

/// Outcome of inserting into an [`EntitySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Registration {
    Inserted,
    /// The id is taken by the same or an equal definition.
    Unchanged,
    /// The id is taken by a different definition, which is kept.
    Conflicting,
}

impl<T: ManifestEntity + PartialEq> EntitySet<T> {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Inserts unless the identifier is already present. The first entry wins.
    fn insert(&mut self, entity: &Arc<T>) -> Registration {
        let id = entity.entity_id();
        if self.ids.contains(id) {
            let existing = self.entries.iter().find(|e| e.entity_id() == id);
            return match existing {
                Some(existing) if !Arc::ptr_eq(existing, entity) && **existing != **entity => {
                    warn!(
                        kind = T::KIND,
                        id,
                        "Conflicting definition ignored; first registration kept"
                    );
                    Registration::Conflicting
                }
                _ => {
                    trace!(kind = T::KIND, id, "Already registered");
                    Registration::Unchanged
                }
            };
        }

        debug!(kind = T::KIND, id, "Registered");
        self.ids.insert(id.to_string());
        self.entries.push(Arc::clone(entity));
        Registration::Inserted
    }

    fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.iter()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The manifest sections produced by a registry export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManifestSections {
    pub functions: BTreeMap<String, Value>,
    pub types: BTreeMap<String, Value>,
    pub workflows: BTreeMap<String, Value>,
    pub datastores: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_auth_providers: Option<ExternalAuthProviders>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalAuthProviders {
    pub oauth2: BTreeMap<String, Value>,
}

/// Accumulates every definition reachable from a manifest's declarations.
#[derive(Debug, Default)]
pub struct ManifestRegistry {
    functions: EntitySet<FunctionDefinition>,
    types: EntitySet<CustomType>,
    workflows: EntitySet<WorkflowDefinition>,
    datastores: EntitySet<DatastoreDefinition>,
    providers: EntitySet<OAuth2Provider>,
}

impl ManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function and the custom types used by its parameters.
    pub fn register_function(&mut self, function: &Arc<FunctionDefinition>) -> bool {
        let inserted = self.functions.insert(function) == Registration::Inserted;
        if inserted {
            function.register_parameter_types(self);
        }
        inserted
    }

    /// Registers a custom type and every custom type nested inside it.
    pub fn register_type(&mut self, custom_type: &Arc<CustomType>) -> bool {
        let inserted = self.types.insert(custom_type) == Registration::Inserted;
        if inserted {
            custom_type.register_parameter_types(self);
        }
        inserted
    }

    pub fn register_types(&mut self, custom_types: &[Arc<CustomType>]) {
        for custom_type in custom_types {
            self.register_type(custom_type);
        }
    }

    /// Registers a workflow, its local step functions and its parameter types.
    pub fn register_workflow(&mut self, workflow: &Arc<WorkflowDefinition>) -> bool {
        let inserted = self.workflows.insert(workflow) == Registration::Inserted;
        if inserted {
            workflow.register_step_functions(self);
            workflow.register_parameter_types(self);
        }
        inserted
    }

    pub fn register_datastore(&mut self, datastore: &Arc<DatastoreDefinition>) -> bool {
        let inserted = self.datastores.insert(datastore) == Registration::Inserted;
        if inserted {
            datastore.register_attribute_types(self);
        }
        inserted
    }

    /// Registers an OAuth2 provider. Provider keys must be unique.
    pub fn register_provider(
        &mut self,
        provider: &Arc<OAuth2Provider>,
    ) -> Result<(), ManifestError> {
        if self.providers.contains(provider.entity_id()) {
            return Err(ManifestError::DuplicateKey {
                kind: OAuth2Provider::KIND,
                key: provider.entity_id().to_string(),
            });
        }
        self.providers.insert(provider);
        Ok(())
    }

    /// Registers every custom type reachable from a parameter set.
    pub fn register_types_reachable_from(&mut self, set: &ParameterSet) {
        for definition in set.properties.values() {
            self.register_definition_types(definition);
        }
    }

    /// Walks a definition through object properties and array items, registering
    /// each custom type found. Already-registered types are not walked again, which
    /// also stops the walk on cyclic type graphs.
    pub fn register_definition_types(&mut self, definition: &ParameterDefinition) {
        match &definition.kind {
            ParameterKind::Custom(custom_type) => {
                self.register_type(custom_type);
            }
            ParameterKind::TypedObject { properties, .. } => {
                for property in properties.values() {
                    self.register_definition_types(property);
                }
            }
            ParameterKind::Array { items } => self.register_definition_types(items),
            ParameterKind::Primitive(_) | ParameterKind::UntypedObject => {}
        }
    }

    pub fn has_function(&self, callback_id: &str) -> bool {
        self.functions.contains(callback_id)
    }

    pub fn has_type(&self, id: &str) -> bool {
        self.types.contains(id)
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Consumes the registry, exporting each entry under its identifier.
    pub fn export(self) -> Result<ManifestSections, ManifestError> {
        let functions = self
            .functions
            .iter()
            .map(|f| (f.entity_id().to_string(), f.export()))
            .collect();
        let types = self
            .types
            .iter()
            .map(|t| (t.entity_id().to_string(), t.export()))
            .collect();
        let workflows = self
            .workflows
            .iter()
            .map(|w| Ok((w.entity_id().to_string(), w.export()?)))
            .collect::<Result<BTreeMap<_, _>, ManifestError>>()?;
        let datastores = self
            .datastores
            .iter()
            .map(|d| (d.entity_id().to_string(), d.export()))
            .collect();
        let external_auth_providers =
            (!self.providers.is_empty()).then(|| ExternalAuthProviders {
                oauth2: self
                    .providers
                    .iter()
                    .map(|p| (p.entity_id().to_string(), p.export()))
                    .collect(),
            });

        Ok(ManifestSections {
            functions,
            types,
            workflows,
            datastores,
            external_auth_providers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address_type() -> Arc<CustomType> {
        CustomType::builder(
            "address",
            ParameterDefinition::typed_object()
                .with_property("city", ParameterDefinition::string()),
        )
        .build()
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = ManifestRegistry::new();
        let first = address_type();
        let second = CustomType::builder("address", ParameterDefinition::string()).build();

        assert!(registry.register_type(&first));
        assert!(!registry.register_type(&second));
        assert_eq!(registry.type_count(), 1);

        let sections = registry.export().unwrap();
        assert_eq!(sections.types["address"], first.export());
    }

    #[test]
    fn platform_types_contribute_nothing() {
        let mut registry = ManifestRegistry::new();
        let set = ParameterSet::new()
            .with_property("user", ParameterDefinition::platform("slack#/types/user_id"));
        registry.register_types_reachable_from(&set);
        assert_eq!(registry.type_count(), 0);
    }

    #[test]
    fn equal_definitions_under_one_id_are_not_conflicts() {
        let mut types = EntitySet::default();
        let first = address_type();

        assert_eq!(types.insert(&first), Registration::Inserted);
        assert_eq!(types.insert(&first), Registration::Unchanged);
        assert_eq!(types.insert(&address_type()), Registration::Unchanged);
        assert_eq!(types.len(), 1);
    }

    #[test]
    fn different_definition_under_existing_id_conflicts() {
        let mut types = EntitySet::default();
        let first = address_type();
        let second = CustomType::builder("address", ParameterDefinition::string()).build();

        assert_eq!(types.insert(&first), Registration::Inserted);
        assert_eq!(types.insert(&second), Registration::Conflicting);
        assert!(Arc::ptr_eq(types.iter().next().unwrap(), &first));
    }

    #[test]
    fn registering_an_equal_type_twice_keeps_one_entry() {
        let mut registry = ManifestRegistry::new();
        assert!(registry.register_type(&address_type()));
        assert!(!registry.register_type(&address_type()));
        assert!(registry.has_type("address"));
        assert_eq!(registry.type_count(), 1);
    }
}
