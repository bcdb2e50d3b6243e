mod document;

pub use document::*;

use crate::auth::OAuth2Provider;
use crate::datastores::DatastoreDefinition;
use crate::error::ManifestError;
use crate::functions::FunctionDefinition;
use crate::registry::ManifestRegistry;
use crate::types::CustomType;
use crate::workflows::WorkflowDefinition;
use std::sync::Arc;
use tracing::debug;

/// The top-level declaration of an app.
pub struct Manifest {
    name: String,
    description: Option<String>,
    long_description: Option<String>,
    icon: Option<String>,
    bot_scopes: Vec<String>,
    functions: Vec<Arc<FunctionDefinition>>,
    workflows: Vec<Arc<WorkflowDefinition>>,
    types: Vec<Arc<CustomType>>,
    datastores: Vec<Arc<DatastoreDefinition>>,
    providers: Vec<Arc<OAuth2Provider>>,
}

pub struct ManifestBuilder {
    manifest: Manifest,
}

impl ManifestBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            manifest: Manifest {
                name: name.to_string(),
                description: None,
                long_description: None,
                icon: None,
                bot_scopes: Vec::new(),
                functions: Vec::new(),
                workflows: Vec::new(),
                types: Vec::new(),
                datastores: Vec::new(),
                providers: Vec::new(),
            },
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.manifest.description = Some(description.to_string());
        self
    }

    pub fn with_long_description(mut self, long_description: &str) -> Self {
        self.manifest.long_description = Some(long_description.to_string());
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.manifest.icon = Some(icon.to_string());
        self
    }

    pub fn with_bot_scopes(mut self, scopes: &[&str]) -> Self {
        self.manifest
            .bot_scopes
            .extend(scopes.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_function(mut self, function: &Arc<FunctionDefinition>) -> Self {
        self.manifest.functions.push(Arc::clone(function));
        self
    }

    pub fn with_workflow(mut self, workflow: WorkflowDefinition) -> Self {
        self.manifest.workflows.push(Arc::new(workflow));
        self
    }

    pub fn with_type(mut self, custom_type: &Arc<CustomType>) -> Self {
        self.manifest.types.push(Arc::clone(custom_type));
        self
    }

    pub fn with_datastore(mut self, datastore: &Arc<DatastoreDefinition>) -> Self {
        self.manifest.datastores.push(Arc::clone(datastore));
        self
    }

    pub fn with_provider(mut self, provider: &Arc<OAuth2Provider>) -> Self {
        self.manifest.providers.push(Arc::clone(provider));
        self
    }

    pub fn build(self) -> Manifest {
        self.manifest
    }
}

impl Manifest {
    pub fn builder(name: &str) -> ManifestBuilder {
        ManifestBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workflows(&self) -> impl Iterator<Item = &WorkflowDefinition> {
        self.workflows.iter().map(|w| w.as_ref())
    }

    /// Walks every declaration into a fresh registry and exports the result.
    ///
    /// Explicitly declared functions are registered before workflows, so they take
    /// precedence over step functions sharing their callback id.
    pub fn export(&self) -> Result<ManifestDocument, ManifestError> {
        let mut registry = ManifestRegistry::new();

        for function in &self.functions {
            registry.register_function(function);
        }
        for workflow in &self.workflows {
            registry.register_workflow(workflow);
        }
        registry.register_types(&self.types);
        for datastore in &self.datastores {
            registry.register_datastore(datastore);
        }
        for provider in &self.providers {
            registry.register_provider(provider)?;
        }

        debug!(
            app = %self.name,
            functions = registry.function_count(),
            types = registry.type_count(),
            "Registration complete"
        );

        let sections = registry.export()?;
        let oauth_config = (!self.bot_scopes.is_empty()).then(|| OAuthConfig {
            scopes: OAuthScopes {
                bot: self.bot_scopes.clone(),
            },
        });

        Ok(ManifestDocument {
            display_information: DisplayInformation {
                name: self.name.clone(),
                description: self.description.clone(),
                long_description: self.long_description.clone(),
            },
            icon: self.icon.clone(),
            oauth_config,
            sections,
        })
    }
}
