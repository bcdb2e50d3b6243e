//! Common test utilities for building definitions.
use kumitate::prelude::*;
use std::sync::Arc;

/// A typed object with two declared string properties.
#[allow(dead_code)]
pub fn create_incident_definition() -> ParameterDefinition {
    ParameterDefinition::typed_object()
        .with_property("id", ParameterDefinition::string())
        .with_property("name", ParameterDefinition::string())
        .with_required(&["id"])
}

/// `address` is a plain typed object.
#[allow(dead_code)]
pub fn create_address_type() -> Arc<CustomType> {
    CustomType::builder(
        "address",
        ParameterDefinition::typed_object()
            .with_property("street", ParameterDefinition::string())
            .with_property("city", ParameterDefinition::string()),
    )
    .with_title("Address")
    .build()
}

#[allow(dead_code)]
pub fn create_tag_type() -> Arc<CustomType> {
    CustomType::builder("tag", ParameterDefinition::string())
        .with_description("A free-form label")
        .build()
}

/// `person` nests `address` through an object property and `tag` through array items.
#[allow(dead_code)]
pub fn create_person_type(address: &Arc<CustomType>, tag: &Arc<CustomType>) -> Arc<CustomType> {
    CustomType::builder(
        "person",
        ParameterDefinition::typed_object()
            .with_property("name", ParameterDefinition::string())
            .with_property("home", ParameterDefinition::custom(address))
            .with_property("tags", ParameterDefinition::array(ParameterDefinition::custom(tag))),
    )
    .build()
}

/// A function taking a string `x` and returning a string `y`.
#[allow(dead_code)]
pub fn create_echo_function() -> Arc<FunctionDefinition> {
    FunctionDefinition::builder("echo", "Echo", "functions/echo.ts")
        .with_input_parameters(
            ParameterSet::new()
                .with_property("x", ParameterDefinition::string())
                .with_required(&["x"]),
        )
        .with_output_parameters(
            ParameterSet::new().with_property("y", ParameterDefinition::string()),
        )
        .build()
}

/// A workflow with a single string input `x`.
#[allow(dead_code)]
pub fn create_x_workflow() -> WorkflowDefinition {
    WorkflowDefinition::builder("relay", "Relay")
        .with_input_parameters(
            ParameterSet::new().with_property("x", ParameterDefinition::string()),
        )
        .build()
}

/// The app description used by the JSON loading tests.
#[allow(dead_code)]
pub const APP_JSON: &str = r##"{
    "name": "Incident Bot",
    "description": "Routes incidents",
    "bot_scopes": ["chat:write"],
    "types": {
        "incident": {
            "type": "object",
            "title": "Incident",
            "properties": {
                "id": { "type": "string" },
                "reporter": { "type": "#/types/reporter" }
            },
            "required": ["id"]
        },
        "reporter": { "type": "slack#/types/user_id" }
    },
    "functions": {
        "triage": {
            "title": "Triage",
            "source_file": "functions/triage.ts",
            "input_parameters": {
                "properties": { "incident": { "type": "#/types/incident" } },
                "required": ["incident"]
            },
            "output_parameters": {
                "properties": { "severity": { "type": "string" } }
            }
        }
    },
    "workflows": {
        "handle_incident": {
            "title": "Handle incident",
            "input_parameters": {
                "properties": { "incident": { "type": "#/types/incident" } }
            },
            "steps": [
                {
                    "id": "ignored",
                    "function_id": "#/functions/triage",
                    "inputs": { "incident": "{{inputs.incident}}" }
                },
                {
                    "function_id": "slack#/functions/send_message",
                    "inputs": { "message": "{{steps.0.severity}}", "silent": true }
                }
            ]
        }
    },
    "datastores": {
        "incidents": {
            "primary_key": "id",
            "attributes": { "id": { "type": "string" }, "payload": { "type": "#/types/incident" } }
        }
    },
    "external_auth_providers": {
        "oauth2": {
            "github": { "provider_type": "CUSTOM", "options": { "client_id": "abc" } }
        }
    }
}"##;
