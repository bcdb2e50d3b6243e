//! # Kumitate - Declarative App Manifest Builder
//!
//! **Kumitate** compiles declarations of functions, workflows, custom types, datastores
//! and external auth providers into a single static manifest document. Values that only
//! exist at runtime are referenced symbolically: every parameter has a placeholder that
//! renders as a `{{path}}` template expression, substituted by the platform when the
//! workflow runs.
//!
//! ## Core Workflow
//!
//! 1.  **Declare Types and Functions**: Describe parameter shapes with `ParameterDefinition`
//!     and group them into `ParameterSet`s for function inputs and outputs.
//! 2.  **Wire Workflows**: Build a `WorkflowDefinition` and add steps. A workflow's `inputs()`
//!     and each step's outputs are placeholder trees you place into later steps' inputs.
//! 3.  **Export**: `Manifest::export` walks every declaration into a fresh registry,
//!     deduplicating by identifier, and serializes the result.
//!
//! Apps can also be loaded from a JSON description with `RawApp` and the `IntoManifest` trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let incident = CustomType::builder(
//!         "incident",
//!         ParameterDefinition::typed_object()
//!             .with_property("id", ParameterDefinition::string())
//!             .with_property("summary", ParameterDefinition::string()),
//!     )
//!     .build();
//!
//!     let triage = FunctionDefinition::builder("triage", "Triage incident", "functions/triage.ts")
//!         .with_input_parameters(
//!             ParameterSet::new()
//!                 .with_property("incident", ParameterDefinition::custom(&incident)),
//!         )
//!         .with_output_parameters(
//!             ParameterSet::new().with_property("severity", ParameterDefinition::string()),
//!         )
//!         .build();
//!
//!     let mut workflow = WorkflowDefinition::builder("handle_incident", "Handle incident")
//!         .with_input_parameters(
//!             ParameterSet::new()
//!                 .with_property("incident", ParameterDefinition::custom(&incident))
//!                 .with_property(
//!                     "channel",
//!                     ParameterDefinition::platform("slack#/types/channel_id"),
//!                 ),
//!         )
//!         .build();
//!
//!     let step = workflow.add_step(
//!         &triage,
//!         StepInputs::new().with("incident", workflow.inputs().get("incident")),
//!     );
//!     workflow.add_step(
//!         "slack#/functions/send_message",
//!         StepInputs::new()
//!             .with("channel_id", workflow.inputs().get("channel"))
//!             .with("message", format!("Severity: {}", step.output("severity"))),
//!     );
//!
//!     let manifest = Manifest::builder("Incident Bot").with_workflow(workflow).build();
//!     println!("{}", manifest.export()?.to_json(true)?);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod auth;
pub mod datastores;
pub mod error;
pub mod functions;
pub mod manifest;
pub mod params;
pub mod prelude;
pub mod reference;
pub mod registry;
pub mod types;
pub mod variable;
pub mod workflows;
