use super::ParameterDefinition;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// The input or output parameters of a function or workflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    pub properties: BTreeMap<String, ParameterDefinition>,
    pub required: Vec<String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: &str, definition: ParameterDefinition) -> Self {
        self.properties.insert(name.to_string(), definition);
        self
    }

    pub fn with_required(mut self, names: &[&str]) -> Self {
        for name in names {
            if !self.required.iter().any(|r| r == name) {
                self.required.push(name.to_string());
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.properties.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn export(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, definition)| (name.clone(), definition.export()))
            .collect();
        json!({
            "properties": properties,
            "required": self.required,
        })
    }
}
