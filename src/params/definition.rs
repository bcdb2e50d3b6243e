use crate::types::CustomType;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The scalar types a parameter may declare.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
    Boolean,
    /// A built-in platform type such as `slack#/types/user_id`. Opaque to this crate.
    Platform(String),
}

impl PrimitiveType {
    pub fn as_str(&self) -> &str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Platform(name) => name,
        }
    }

    /// Parses a schema `type` string. Unrecognised names are treated as platform types.
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => PrimitiveType::String,
            "number" => PrimitiveType::Number,
            "integer" => PrimitiveType::Integer,
            "boolean" => PrimitiveType::Boolean,
            other => PrimitiveType::Platform(other.to_string()),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    Primitive(PrimitiveType),
    TypedObject {
        properties: BTreeMap<String, ParameterDefinition>,
        required: Vec<String>,
        additional_properties: Option<bool>,
    },
    UntypedObject,
    Array {
        items: Box<ParameterDefinition>,
    },
    Custom(Arc<CustomType>),
}

/// A parameter's shape plus the descriptive metadata carried into the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    pub kind: ParameterKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub hint: Option<String>,
    pub default: Option<Value>,
}

impl ParameterDefinition {
    pub fn new(kind: ParameterKind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
            hint: None,
            default: None,
        }
    }

    pub fn string() -> Self {
        Self::new(ParameterKind::Primitive(PrimitiveType::String))
    }

    pub fn number() -> Self {
        Self::new(ParameterKind::Primitive(PrimitiveType::Number))
    }

    pub fn integer() -> Self {
        Self::new(ParameterKind::Primitive(PrimitiveType::Integer))
    }

    pub fn boolean() -> Self {
        Self::new(ParameterKind::Primitive(PrimitiveType::Boolean))
    }

    pub fn platform(type_name: &str) -> Self {
        Self::new(ParameterKind::Primitive(PrimitiveType::Platform(
            type_name.to_string(),
        )))
    }

    /// An object with no declared properties. Any property path is accepted.
    pub fn object() -> Self {
        Self::new(ParameterKind::UntypedObject)
    }

    /// An object with declared properties, to be filled with `with_property`.
    pub fn typed_object() -> Self {
        Self::new(ParameterKind::TypedObject {
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional_properties: None,
        })
    }

    pub fn array(items: ParameterDefinition) -> Self {
        Self::new(ParameterKind::Array {
            items: Box::new(items),
        })
    }

    pub fn custom(custom_type: &Arc<CustomType>) -> Self {
        Self::new(ParameterKind::Custom(Arc::clone(custom_type)))
    }

    /// Adds a declared property. An untyped object is promoted to a typed one;
    /// on any other kind this is a no-op.
    pub fn with_property(mut self, name: &str, definition: ParameterDefinition) -> Self {
        if matches!(self.kind, ParameterKind::UntypedObject) {
            self.kind = ParameterKind::TypedObject {
                properties: BTreeMap::new(),
                required: Vec::new(),
                additional_properties: None,
            };
        }
        if let ParameterKind::TypedObject { properties, .. } = &mut self.kind {
            properties.insert(name.to_string(), definition);
        }
        self
    }

    pub fn with_required(mut self, names: &[&str]) -> Self {
        if let ParameterKind::TypedObject { required, .. } = &mut self.kind {
            for name in names {
                if !required.iter().any(|r| r == name) {
                    required.push(name.to_string());
                }
            }
        }
        self
    }

    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        if let ParameterKind::TypedObject {
            additional_properties,
            ..
        } = &mut self.kind
        {
            *additional_properties = Some(allowed);
        }
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Serializes into the JSON-schema-shaped form used in the manifest.
    pub fn export(&self) -> Value {
        let mut schema = Map::new();
        match &self.kind {
            ParameterKind::Primitive(primitive) => {
                schema.insert("type".into(), json!(primitive.as_str()));
            }
            ParameterKind::TypedObject {
                properties,
                required,
                additional_properties,
            } => {
                schema.insert("type".into(), json!("object"));
                let exported: Map<String, Value> = properties
                    .iter()
                    .map(|(name, property)| (name.clone(), property.export()))
                    .collect();
                schema.insert("properties".into(), Value::Object(exported));
                if !required.is_empty() {
                    schema.insert("required".into(), json!(required));
                }
                if let Some(allowed) = additional_properties {
                    schema.insert("additionalProperties".into(), json!(allowed));
                }
            }
            ParameterKind::UntypedObject => {
                schema.insert("type".into(), json!("object"));
            }
            ParameterKind::Array { items } => {
                schema.insert("type".into(), json!("array"));
                schema.insert("items".into(), items.export());
            }
            ParameterKind::Custom(custom_type) => {
                schema.insert("type".into(), json!(custom_type.reference()));
            }
        }

        if let Some(title) = &self.title {
            schema.insert("title".into(), json!(title));
        }
        if let Some(description) = &self.description {
            schema.insert("description".into(), json!(description));
        }
        if let Some(hint) = &self.hint {
            schema.insert("hint".into(), json!(hint));
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        Value::Object(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_typed_object_schema() {
        let definition = ParameterDefinition::typed_object()
            .with_property("id", ParameterDefinition::string())
            .with_property("count", ParameterDefinition::integer())
            .with_required(&["id"])
            .with_additional_properties(false)
            .with_description("An incident");

        assert_eq!(
            definition.export(),
            json!({
                "type": "object",
                "properties": {
                    "count": { "type": "integer" },
                    "id": { "type": "string" }
                },
                "required": ["id"],
                "additionalProperties": false,
                "description": "An incident"
            })
        );
    }

    #[test]
    fn with_property_promotes_untyped_object() {
        let definition =
            ParameterDefinition::object().with_property("a", ParameterDefinition::boolean());
        assert!(matches!(definition.kind, ParameterKind::TypedObject { .. }));
    }

    #[test]
    fn platform_types_round_trip_through_names() {
        assert_eq!(PrimitiveType::from_name("integer"), PrimitiveType::Integer);
        let platform = PrimitiveType::from_name("slack#/types/user_id");
        assert_eq!(platform.as_str(), "slack#/types/user_id");
    }
}
