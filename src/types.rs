use crate::params::ParameterDefinition;
use crate::registry::{ManifestEntity, ManifestRegistry};
use serde_json::{Value, json};
use std::sync::Arc;

/// A named, reusable type definition.
///
/// Custom types are transparent aliases for path construction and are exported into
/// the manifest's `types` section, referenced elsewhere as `#/types/<id>`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomType {
    pub id: String,
    pub definition: ParameterDefinition,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CustomType {
    pub fn builder(id: &str, definition: ParameterDefinition) -> CustomTypeBuilder {
        CustomTypeBuilder {
            custom_type: CustomType {
                id: id.to_string(),
                definition,
                title: None,
                description: None,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The manifest-local reference to this type.
    pub fn reference(&self) -> String {
        format!("#/types/{}", self.id)
    }

    /// Registers every custom type nested in this type's definition.
    pub fn register_parameter_types(&self, registry: &mut ManifestRegistry) {
        registry.register_definition_types(&self.definition);
    }

    pub fn export(&self) -> Value {
        let mut exported = self.definition.export();
        if let Value::Object(map) = &mut exported {
            if let Some(title) = &self.title {
                map.insert("title".into(), json!(title));
            }
            if let Some(description) = &self.description {
                map.insert("description".into(), json!(description));
            }
        }
        exported
    }
}

impl ManifestEntity for CustomType {
    const KIND: &'static str = "type";

    fn entity_id(&self) -> &str {
        &self.id
    }
}

pub struct CustomTypeBuilder {
    custom_type: CustomType,
}

impl CustomTypeBuilder {
    pub fn with_title(mut self, title: &str) -> Self {
        self.custom_type.title = Some(title.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.custom_type.description = Some(description.to_string());
        self
    }

    pub fn build(self) -> Arc<CustomType> {
        Arc::new(self.custom_type)
    }
}
