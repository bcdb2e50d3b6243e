use crate::params::ParameterSet;
use crate::registry::{ManifestEntity, ManifestRegistry};
use crate::variable::ObjectVariable;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// A locally defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub callback_id: String,
    pub title: String,
    pub description: Option<String>,
    pub source_file: String,
    pub input_parameters: ParameterSet,
    pub output_parameters: ParameterSet,
}

impl FunctionDefinition {
    pub fn builder(callback_id: &str, title: &str, source_file: &str) -> FunctionDefinitionBuilder {
        FunctionDefinitionBuilder {
            function: FunctionDefinition {
                callback_id: callback_id.to_string(),
                title: title.to_string(),
                description: None,
                source_file: source_file.to_string(),
                input_parameters: ParameterSet::new(),
                output_parameters: ParameterSet::new(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.callback_id
    }

    /// The manifest-local reference used as a step's `function_id`.
    pub fn reference(&self) -> String {
        format!("#/functions/{}", self.callback_id)
    }

    /// Placeholders for this function's outputs when run as step `step_id`.
    pub fn step_outputs(&self, step_id: &str) -> ObjectVariable {
        ObjectVariable::from_set("steps", step_id, &self.output_parameters)
    }

    pub fn register_parameter_types(&self, registry: &mut ManifestRegistry) {
        registry.register_types_reachable_from(&self.input_parameters);
        registry.register_types_reachable_from(&self.output_parameters);
    }

    pub fn export(&self) -> Value {
        let mut exported = Map::new();
        exported.insert("title".into(), json!(self.title));
        if let Some(description) = &self.description {
            exported.insert("description".into(), json!(description));
        }
        exported.insert("source_file".into(), json!(self.source_file));
        exported.insert("input_parameters".into(), self.input_parameters.export());
        exported.insert("output_parameters".into(), self.output_parameters.export());
        Value::Object(exported)
    }
}

impl ManifestEntity for FunctionDefinition {
    const KIND: &'static str = "function";

    fn entity_id(&self) -> &str {
        &self.callback_id
    }
}

pub struct FunctionDefinitionBuilder {
    function: FunctionDefinition,
}

impl FunctionDefinitionBuilder {
    pub fn with_description(mut self, description: &str) -> Self {
        self.function.description = Some(description.to_string());
        self
    }

    pub fn with_input_parameters(mut self, parameters: ParameterSet) -> Self {
        self.function.input_parameters = parameters;
        self
    }

    pub fn with_output_parameters(mut self, parameters: ParameterSet) -> Self {
        self.function.output_parameters = parameters;
        self
    }

    pub fn build(self) -> Arc<FunctionDefinition> {
        Arc::new(self.function)
    }
}
