//! Workflow definitions and their steps.
//!
//! A workflow's `inputs()` and each step's outputs are placeholder trees. Placing
//! them into a later step's [`StepInputs`] wires the steps together; on export every
//! placeholder becomes a `{{inputs.x}}` or `{{steps.N.y}}` template string.

mod inputs;
mod step;

pub use inputs::{StepInput, StepInputs};
pub use step::{StepFunction, WorkflowStep, WorkflowStepHandle};

use crate::error::ManifestError;
use crate::params::ParameterSet;
use crate::registry::{ManifestEntity, ManifestRegistry};
use crate::variable::ObjectVariable;
use serde_json::{Map, Value, json};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDefinition {
    pub callback_id: String,
    pub title: String,
    pub description: Option<String>,
    input_parameters: ParameterSet,
    output_parameters: ParameterSet,
    inputs: ObjectVariable,
    steps: Vec<WorkflowStep>,
}

impl WorkflowDefinition {
    pub fn builder(callback_id: &str, title: &str) -> WorkflowDefinitionBuilder {
        WorkflowDefinitionBuilder {
            callback_id: callback_id.to_string(),
            title: title.to_string(),
            description: None,
            input_parameters: ParameterSet::new(),
            output_parameters: ParameterSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.callback_id
    }

    pub fn input_parameters(&self) -> &ParameterSet {
        &self.input_parameters
    }

    pub fn output_parameters(&self) -> &ParameterSet {
        &self.output_parameters
    }

    /// Placeholders for this workflow's inputs, rooted at `inputs`.
    pub fn inputs(&self) -> &ObjectVariable {
        &self.inputs
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    /// Appends a step. Its id is its position in the step list.
    pub fn add_step(
        &mut self,
        function: impl Into<StepFunction>,
        inputs: StepInputs,
    ) -> WorkflowStepHandle {
        let step_id = self.steps.len().to_string();
        let step = WorkflowStep::new(step_id, function.into(), inputs);
        debug!(
            workflow = %self.callback_id,
            step_id = step.step_id(),
            function_id = step.function_reference(),
            "Added workflow step"
        );
        let handle = step.handle();
        self.steps.push(step);
        handle
    }

    pub fn register_step_functions(&self, registry: &mut ManifestRegistry) {
        for step in &self.steps {
            step.register_function(registry);
        }
    }

    pub fn register_parameter_types(&self, registry: &mut ManifestRegistry) {
        registry.register_types_reachable_from(&self.input_parameters);
        registry.register_types_reachable_from(&self.output_parameters);
    }

    pub fn export(&self) -> Result<Value, ManifestError> {
        let steps = self
            .steps
            .iter()
            .map(|step| {
                step.export().map_err(|e| ManifestError::Templatize {
                    workflow: self.callback_id.clone(),
                    step_id: step.step_id().to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut exported = Map::new();
        exported.insert("title".into(), json!(self.title));
        if let Some(description) = &self.description {
            exported.insert("description".into(), json!(description));
        }
        if !self.input_parameters.is_empty() {
            exported.insert("input_parameters".into(), self.input_parameters.export());
        }
        if !self.output_parameters.is_empty() {
            exported.insert("output_parameters".into(), self.output_parameters.export());
        }
        exported.insert("steps".into(), Value::Array(steps));
        Ok(Value::Object(exported))
    }
}

impl ManifestEntity for WorkflowDefinition {
    const KIND: &'static str = "workflow";

    fn entity_id(&self) -> &str {
        &self.callback_id
    }
}

pub struct WorkflowDefinitionBuilder {
    callback_id: String,
    title: String,
    description: Option<String>,
    input_parameters: ParameterSet,
    output_parameters: ParameterSet,
}

impl WorkflowDefinitionBuilder {
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_input_parameters(mut self, parameters: ParameterSet) -> Self {
        self.input_parameters = parameters;
        self
    }

    pub fn with_output_parameters(mut self, parameters: ParameterSet) -> Self {
        self.output_parameters = parameters;
        self
    }

    pub fn build(self) -> WorkflowDefinition {
        let inputs = ObjectVariable::from_set("", "inputs", &self.input_parameters);
        WorkflowDefinition {
            callback_id: self.callback_id,
            title: self.title,
            description: self.description,
            input_parameters: self.input_parameters,
            output_parameters: self.output_parameters,
            inputs,
            steps: Vec::new(),
        }
    }
}
