use crate::auth::ProviderType;
use crate::error::DefinitionError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

// --- JSON Deserialization Structs ---
// These mirror the manifest's own JSON layout so an exported manifest's sections can
// be fed back in. Parameter schemas stay as raw `Value`s until conversion, because
// custom type references can only be resolved once every type has been seen.

#[derive(Debug, Deserialize)]
pub struct RawApp {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub bot_scopes: Vec<String>,
    #[serde(default)]
    pub types: BTreeMap<String, Value>,
    #[serde(default)]
    pub functions: BTreeMap<String, RawFunction>,
    #[serde(default)]
    pub workflows: BTreeMap<String, RawWorkflow>,
    #[serde(default)]
    pub datastores: BTreeMap<String, RawDatastore>,
    #[serde(default)]
    pub external_auth_providers: Option<RawExternalAuthProviders>,
}

impl RawApp {
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(|e| DefinitionError::JsonParseError(e.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawParameterSet {
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawFunction {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source_file: String,
    #[serde(default)]
    pub input_parameters: RawParameterSet,
    #[serde(default)]
    pub output_parameters: RawParameterSet,
}

#[derive(Debug, Deserialize)]
pub struct RawWorkflow {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_parameters: RawParameterSet,
    #[serde(default)]
    pub output_parameters: RawParameterSet,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

/// A step as written in a manifest. Any `id` field is ignored: ids are positional.
#[derive(Debug, Deserialize)]
pub struct RawStep {
    pub function_id: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawDatastore {
    pub primary_key: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawExternalAuthProviders {
    #[serde(default)]
    pub oauth2: BTreeMap<String, RawProvider>,
}

#[derive(Debug, Deserialize)]
pub struct RawProvider {
    pub provider_type: ProviderType,
    #[serde(default)]
    pub options: Value,
}
