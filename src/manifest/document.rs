use crate::error::ManifestError;
use crate::registry::ManifestSections;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayInformation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthConfig {
    pub scopes: OAuthScopes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthScopes {
    pub bot: Vec<String>,
}

/// The exported manifest, ready to be written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestDocument {
    pub display_information: DisplayInformation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_config: Option<OAuthConfig>,
    #[serde(flatten)]
    pub sections: ManifestSections,
}

impl ManifestDocument {
    pub fn to_value(&self) -> Result<Value, ManifestError> {
        serde_json::to_value(self).map_err(|e| ManifestError::Serialization(e.to_string()))
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ManifestError> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.map_err(|e| ManifestError::Serialization(e.to_string()))
    }
}
