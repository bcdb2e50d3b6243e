use super::inputs::StepInputs;
use crate::functions::FunctionDefinition;
use crate::reference::PathReference;
use crate::registry::ManifestRegistry;
use crate::variable::{ObjectVariable, ParameterVariable};
use serde_json::{Value, json};
use std::sync::Arc;

const LOCAL_FUNCTION_PREFIX: &str = "#/functions/";

/// The function a step invokes.
#[derive(Debug, Clone, PartialEq)]
pub enum StepFunction {
    /// A function defined in this app. Its outputs are typed.
    Local(Arc<FunctionDefinition>),
    /// An opaque function id, either a local callback id or a namespaced
    /// platform function such as `slack#/functions/send_message`.
    Reference(String),
}

impl StepFunction {
    /// The callback id a function reference names in this app, if it is local.
    ///
    /// Both `#/functions/<id>` and a bare `<id>` are local; namespaced references
    /// such as `slack#/functions/send_message` are not.
    pub fn local_callback_id(reference: &str) -> Option<&str> {
        match reference.strip_prefix(LOCAL_FUNCTION_PREFIX) {
            Some(callback_id) => Some(callback_id),
            None if !reference.contains("#/") => Some(reference),
            None => None,
        }
    }
}

impl From<Arc<FunctionDefinition>> for StepFunction {
    fn from(function: Arc<FunctionDefinition>) -> Self {
        StepFunction::Local(function)
    }
}

impl From<&Arc<FunctionDefinition>> for StepFunction {
    fn from(function: &Arc<FunctionDefinition>) -> Self {
        StepFunction::Local(Arc::clone(function))
    }
}

impl From<&str> for StepFunction {
    fn from(reference: &str) -> Self {
        StepFunction::Reference(reference.to_string())
    }
}

impl From<String> for StepFunction {
    fn from(reference: String) -> Self {
        StepFunction::Reference(reference)
    }
}

/// A step within a workflow. Immutable once added.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowStep {
    step_id: String,
    function_reference: String,
    definition: Option<Arc<FunctionDefinition>>,
    inputs: StepInputs,
    outputs: ObjectVariable,
}

impl WorkflowStep {
    pub(super) fn new(step_id: String, function: StepFunction, inputs: StepInputs) -> Self {
        let (function_reference, definition) = match function {
            StepFunction::Local(definition) => (definition.reference(), Some(definition)),
            StepFunction::Reference(reference) if reference.contains("#/") => (reference, None),
            StepFunction::Reference(callback_id) => {
                (format!("{LOCAL_FUNCTION_PREFIX}{callback_id}"), None)
            }
        };

        let outputs = match &definition {
            Some(definition) => definition.step_outputs(&step_id),
            None => ObjectVariable::dynamic(PathReference::new(["steps", step_id.as_str()])),
        };

        Self {
            step_id,
            function_reference,
            definition,
            inputs,
            outputs,
        }
    }

    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    pub fn function_reference(&self) -> &str {
        &self.function_reference
    }

    pub fn inputs(&self) -> &StepInputs {
        &self.inputs
    }

    pub fn outputs(&self) -> &ObjectVariable {
        &self.outputs
    }

    pub fn is_local_function_reference(&self) -> bool {
        self.function_reference.starts_with(LOCAL_FUNCTION_PREFIX)
    }

    /// Registers the step's function if it is defined in this app.
    pub fn register_function(&self, registry: &mut ManifestRegistry) {
        if !self.is_local_function_reference() {
            return;
        }
        if let Some(definition) = &self.definition {
            registry.register_function(definition);
        }
    }

    pub fn templatize_inputs(&self) -> Result<serde_json::Map<String, Value>, serde_json::Error> {
        self.inputs.templatize()
    }

    pub fn export(&self) -> Result<Value, serde_json::Error> {
        Ok(json!({
            "id": self.step_id,
            "function_id": self.function_reference,
            "inputs": self.templatize_inputs()?,
        }))
    }

    pub(super) fn handle(&self) -> WorkflowStepHandle {
        WorkflowStepHandle {
            step_id: self.step_id.clone(),
            outputs: self.outputs.clone(),
        }
    }
}

/// Returned by `add_step` so later steps can reference this step's outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowStepHandle {
    step_id: String,
    outputs: ObjectVariable,
}

impl WorkflowStepHandle {
    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    pub fn outputs(&self) -> &ObjectVariable {
        &self.outputs
    }

    /// Shorthand for `outputs().get(name)`.
    pub fn output(&self, name: &str) -> ParameterVariable {
        self.outputs.get(name)
    }
}
