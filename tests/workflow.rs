//! Tests for workflow steps and input templatization.
mod common;
use common::*;
use kumitate::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_steps_reference_inputs_and_prior_outputs() {
    let echo = create_echo_function();
    let mut workflow = create_x_workflow();

    let step_a = workflow.add_step(&echo, StepInputs::new().with("x", workflow.inputs().get("x")));
    let step_b = workflow.add_step(
        &echo,
        StepInputs::new().with("whatever", step_a.output("y")),
    );
    assert_eq!(step_a.step_id(), "0");
    assert_eq!(step_b.step_id(), "1");

    let exported = workflow.export().expect("Export should succeed");
    let steps = exported["steps"].as_array().unwrap();

    assert_eq!(steps[0]["id"], json!("0"));
    assert_eq!(steps[0]["function_id"], json!("#/functions/echo"));
    assert_eq!(steps[0]["inputs"]["x"], json!("{{inputs.x}}"));
    assert_eq!(steps[1]["inputs"]["whatever"], json!("{{steps.0.y}}"));
}

#[test]
fn test_literals_and_embedded_placeholders() {
    let mut workflow = create_x_workflow();
    let greeting = format!("Hello {}!", workflow.inputs().get("x"));
    workflow.add_step(
        "slack#/functions/send_message",
        StepInputs::new()
            .with("message", greeting)
            .with("count", 2i64)
            .with("ratio", 0.5)
            .with("raw", json!({"nested": [1, 2]})),
    );

    let exported = workflow.export().unwrap();
    assert_eq!(
        exported["steps"][0]["inputs"],
        json!({
            "message": "Hello {{inputs.x}}!",
            "count": 2,
            "ratio": 0.5,
            "raw": {"nested": [1, 2]}
        })
    );
}

#[test]
fn test_string_reference_steps_have_dynamic_outputs() {
    let mut workflow = create_x_workflow();
    let step = workflow.add_step("slack#/functions/create_channel", StepInputs::new());

    assert!(step.outputs().is_dynamic());
    assert_eq!(step.outputs().to_string(), "{{steps.0}}");
    assert_eq!(step.output("channel_id").to_string(), "{{steps.0.channel_id}}");
    assert_eq!(
        step.outputs().at(&["a", "b"]).unwrap().to_string(),
        "{{steps.0.a.b}}"
    );
}

#[test]
fn test_typed_step_outputs_follow_function_outputs() {
    let echo = create_echo_function();
    let mut workflow = create_x_workflow();
    workflow.add_step("slack#/functions/noop", StepInputs::new());
    let step = workflow.add_step(&echo, StepInputs::new());

    let outputs = step.outputs();
    assert!(!outputs.is_dynamic());
    assert_eq!(outputs.declared("y").unwrap().to_string(), "{{steps.1.y}}");
    assert_eq!(workflow.steps()[1].outputs(), outputs);
}

#[test]
fn test_only_local_step_functions_are_registered() {
    let echo = create_echo_function();
    let mut workflow = create_x_workflow();
    workflow.add_step(&echo, StepInputs::new());
    workflow.add_step("slack#/functions/send_message", StepInputs::new());
    workflow.add_step("defined_elsewhere", StepInputs::new());

    assert!(workflow.steps()[0].is_local_function_reference());
    assert!(!workflow.steps()[1].is_local_function_reference());
    assert_eq!(
        workflow.steps()[2].function_reference(),
        "#/functions/defined_elsewhere"
    );

    let mut registry = ManifestRegistry::new();
    workflow.register_step_functions(&mut registry);
    assert_eq!(registry.function_count(), 1);
    assert!(registry.has_function("echo"));
    assert!(!registry.has_function("defined_elsewhere"));
}

#[test]
fn test_workflow_export_shape() {
    let echo = create_echo_function();
    let mut workflow = WorkflowDefinition::builder("relay", "Relay")
        .with_description("Relays x")
        .with_input_parameters(
            ParameterSet::new().with_property("x", ParameterDefinition::string()),
        )
        .build();
    workflow.add_step(&echo, StepInputs::new().with("x", workflow.inputs().get("x")));

    let document = Manifest::builder("Relay App")
        .with_workflow(workflow)
        .build()
        .export()
        .unwrap();

    assert_eq!(
        document.sections.workflows["relay"],
        json!({
            "title": "Relay",
            "description": "Relays x",
            "input_parameters": {
                "properties": { "x": { "type": "string" } },
                "required": []
            },
            "steps": [
                { "id": "0", "function_id": "#/functions/echo", "inputs": { "x": "{{inputs.x}}" } }
            ]
        })
    );
    assert!(document.sections.functions.contains_key("echo"));
}

#[test]
fn test_local_callback_id_accepts_prefixed_and_bare_ids() {
    assert_eq!(StepFunction::local_callback_id("#/functions/echo"), Some("echo"));
    assert_eq!(StepFunction::local_callback_id("echo"), Some("echo"));
    assert_eq!(
        StepFunction::local_callback_id("slack#/functions/send_message"),
        None
    );
}
