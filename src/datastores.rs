use crate::params::ParameterDefinition;
use crate::registry::{ManifestEntity, ManifestRegistry};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A keyed record store declared by the app.
#[derive(Debug, Clone, PartialEq)]
pub struct DatastoreDefinition {
    pub name: String,
    pub primary_key: String,
    pub attributes: BTreeMap<String, ParameterDefinition>,
}

impl DatastoreDefinition {
    pub fn new(name: &str, primary_key: &str) -> Self {
        Self {
            name: name.to_string(),
            primary_key: primary_key.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, definition: ParameterDefinition) -> Self {
        self.attributes.insert(name.to_string(), definition);
        self
    }

    pub fn build(self) -> Arc<DatastoreDefinition> {
        Arc::new(self)
    }

    pub fn register_attribute_types(&self, registry: &mut ManifestRegistry) {
        for attribute in self.attributes.values() {
            registry.register_definition_types(attribute);
        }
    }

    pub fn export(&self) -> Value {
        let attributes: Map<String, Value> = self
            .attributes
            .iter()
            .map(|(name, definition)| (name.clone(), definition.export()))
            .collect();
        json!({
            "primary_key": self.primary_key,
            "attributes": attributes,
        })
    }
}

impl ManifestEntity for DatastoreDefinition {
    const KIND: &'static str = "datastore";

    fn entity_id(&self) -> &str {
        &self.name
    }
}
