//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kumitate crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/app.json")?;
//! let manifest = RawApp::from_json(&json)?.into_manifest()?;
//! println!("{}", manifest.export()?.to_json(true)?);
//! # Ok(())
//! # }
//! ```

// Definitions
pub use crate::auth::{OAuth2Provider, ProviderType};
pub use crate::datastores::DatastoreDefinition;
pub use crate::functions::FunctionDefinition;
pub use crate::params::{ParameterDefinition, ParameterKind, ParameterSet, PrimitiveType};
pub use crate::types::CustomType;
pub use crate::workflows::{
    StepFunction, StepInput, StepInputs, WorkflowDefinition, WorkflowStepHandle,
};

// Placeholders
pub use crate::reference::{PathReference, make_reference};
pub use crate::variable::{ObjectVariable, ParameterVariable};

// Registration and export
pub use crate::app::{IntoManifest, RawApp};
pub use crate::manifest::{Manifest, ManifestDocument};
pub use crate::registry::ManifestRegistry;

// Error types
pub use crate::error::{DefinitionError, ManifestError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
