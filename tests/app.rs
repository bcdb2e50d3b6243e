//! End-to-end tests loading an app description from JSON.
mod common;
use common::*;
use kumitate::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_app_json_exports_full_manifest() {
    let manifest = RawApp::from_json(APP_JSON)
        .and_then(|raw| raw.into_manifest())
        .expect("App description should convert");
    let value = manifest.export().unwrap().to_value().unwrap();

    assert_eq!(
        value["display_information"]["description"],
        json!("Routes incidents")
    );
    assert_eq!(
        value["types"]["incident"],
        json!({
            "type": "object",
            "title": "Incident",
            "properties": {
                "id": { "type": "string" },
                "reporter": { "type": "#/types/reporter" }
            },
            "required": ["id"]
        })
    );
    assert_eq!(value["types"]["reporter"], json!({ "type": "slack#/types/user_id" }));
    assert_eq!(value["functions"]["triage"]["source_file"], json!("functions/triage.ts"));

    let steps = &value["workflows"]["handle_incident"]["steps"];
    assert_eq!(steps[0]["id"], json!("0"));
    assert_eq!(steps[0]["function_id"], json!("#/functions/triage"));
    assert_eq!(steps[0]["inputs"]["incident"], json!("{{inputs.incident}}"));
    assert_eq!(steps[1]["id"], json!("1"));
    assert_eq!(
        steps[1]["inputs"],
        json!({ "message": "{{steps.0.severity}}", "silent": true })
    );

    assert_eq!(
        value["datastores"]["incidents"]["attributes"]["payload"],
        json!({ "type": "#/types/incident" })
    );
    assert_eq!(
        value["external_auth_providers"]["oauth2"]["github"]["provider_type"],
        json!("CUSTOM")
    );
}

#[test]
fn test_loaded_workflow_exposes_typed_placeholders() {
    let manifest = RawApp::from_json(APP_JSON).unwrap().into_manifest().unwrap();
    let workflow = manifest.workflows().next().unwrap();

    assert_eq!(
        workflow.inputs().at(&["incident", "reporter"]).unwrap().to_string(),
        "{{inputs.incident.reporter}}"
    );
    let triage_step = &workflow.steps()[0];
    assert_eq!(
        triage_step.outputs().declared("severity").unwrap().to_string(),
        "{{steps.0.severity}}"
    );
    assert!(workflow.steps()[1].outputs().is_dynamic());
}

#[test]
fn test_bare_function_id_resolves_to_declared_function() {
    let json = r##"{
        "name": "Echo",
        "functions": {
            "echo": {
                "title": "Echo",
                "source_file": "functions/echo.ts",
                "output_parameters": { "properties": { "y": { "type": "string" } } }
            }
        },
        "workflows": {
            "relay": { "title": "Relay", "steps": [{ "function_id": "echo" }] }
        }
    }"##;
    let manifest = RawApp::from_json(json).unwrap().into_manifest().unwrap();
    let workflow = manifest.workflows().next().unwrap();
    let step = &workflow.steps()[0];

    assert_eq!(step.function_reference(), "#/functions/echo");
    assert!(step.is_local_function_reference());
    assert!(!step.outputs().is_dynamic());
    assert_eq!(step.outputs().declared_names().collect::<Vec<_>>(), vec!["y"]);
    assert_eq!(step.outputs().get("y").to_string(), "{{steps.0.y}}");
}

#[test]
fn test_unknown_type_reference_is_rejected() {
    let json = r##"{
        "name": "Broken",
        "functions": {
            "f": {
                "title": "F",
                "source_file": "f.ts",
                "input_parameters": { "properties": { "a": { "type": "#/types/missing" } } }
            }
        }
    }"##;
    let err = RawApp::from_json(json).unwrap().into_manifest().err().unwrap();
    assert_eq!(
        err,
        DefinitionError::UnknownType {
            owner: "f".to_string(),
            reference: "#/types/missing".to_string(),
        }
    );
}

#[test]
fn test_invalid_parameter_schema_is_rejected() {
    let json = r#"{
        "name": "Broken",
        "datastores": {
            "d": { "primary_key": "id", "attributes": { "tags": { "type": "array" } } }
        }
    }"#;
    let err = RawApp::from_json(json).unwrap().into_manifest().err().unwrap();
    assert!(matches!(
        err,
        DefinitionError::InvalidParameter { ref parameter, .. } if parameter == "tags"
    ));
}

#[test]
fn test_malformed_json_is_reported() {
    let err = RawApp::from_json("{ not json").unwrap_err();
    assert!(matches!(err, DefinitionError::JsonParseError(_)));
}
