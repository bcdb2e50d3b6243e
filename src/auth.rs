use crate::registry::ManifestEntity;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderType {
    Custom,
    Google,
}

/// An external OAuth2 provider. Provider keys are unique within a manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuth2Provider {
    pub provider_key: String,
    pub provider_type: ProviderType,
    pub options: Value,
}

impl OAuth2Provider {
    pub fn new(provider_key: &str, provider_type: ProviderType, options: Value) -> Arc<Self> {
        Arc::new(Self {
            provider_key: provider_key.to_string(),
            provider_type,
            options,
        })
    }

    pub fn export(&self) -> Value {
        json!({
            "provider_type": self.provider_type,
            "options": self.options,
        })
    }
}

impl ManifestEntity for OAuth2Provider {
    const KIND: &'static str = "oauth2 provider";

    fn entity_id(&self) -> &str {
        &self.provider_key
    }
}
