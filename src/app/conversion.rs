use super::raw::{RawApp, RawParameterSet};
use crate::auth::OAuth2Provider;
use crate::datastores::DatastoreDefinition;
use crate::error::DefinitionError;
use crate::functions::FunctionDefinition;
use crate::manifest::Manifest;
use crate::params::{ParameterDefinition, ParameterKind, ParameterSet, PrimitiveType};
use crate::types::CustomType;
use crate::workflows::{StepFunction, StepInputs, WorkflowDefinition};
use ahash::{AHashMap, AHashSet};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const TYPE_REFERENCE_PREFIX: &str = "#/types/";

/// A trait for app descriptions that can be converted into a [`Manifest`].
///
/// This is the extension point for loading apps from formats other than the
/// built-in JSON layout: implement it on your own structs to translate them into
/// typed definitions.
///
/// # Example
///
/// ```rust,no_run
/// use kumitate::app::IntoManifest;
/// use kumitate::error::DefinitionError;
/// use kumitate::functions::FunctionDefinition;
/// use kumitate::manifest::Manifest;
///
/// struct MyApp { name: String, functions: Vec<(String, String)> }
///
/// impl IntoManifest for MyApp {
///     fn into_manifest(self) -> Result<Manifest, DefinitionError> {
///         let mut builder = Manifest::builder(&self.name);
///         for (callback_id, source_file) in &self.functions {
///             let function =
///                 FunctionDefinition::builder(callback_id, callback_id, source_file).build();
///             builder = builder.with_function(&function);
///         }
///         Ok(builder.build())
///     }
/// }
/// ```
pub trait IntoManifest {
    /// Consumes the description and converts it into a manifest declaration.
    fn into_manifest(self) -> Result<Manifest, DefinitionError>;
}

/// Resolves `#/types/<id>` references lazily, so types may reference types declared
/// after them.
struct TypeResolver<'a> {
    raw: &'a BTreeMap<String, Value>,
    resolved: AHashMap<String, Arc<CustomType>>,
    in_progress: AHashSet<String>,
}

impl<'a> TypeResolver<'a> {
    fn new(raw: &'a BTreeMap<String, Value>) -> Self {
        Self {
            raw,
            resolved: AHashMap::new(),
            in_progress: AHashSet::new(),
        }
    }

    fn resolve(&mut self, owner: &str, id: &str) -> Result<Arc<CustomType>, DefinitionError> {
        if let Some(custom_type) = self.resolved.get(id) {
            return Ok(Arc::clone(custom_type));
        }
        if self.in_progress.contains(id) {
            return Err(DefinitionError::CyclicType(id.to_string()));
        }
        let schema = self.raw.get(id).ok_or_else(|| DefinitionError::UnknownType {
            owner: owner.to_string(),
            reference: format!("{}{}", TYPE_REFERENCE_PREFIX, id),
        })?;

        self.in_progress.insert(id.to_string());
        let mut definition = self.parse_parameter(id, id, schema)?;
        self.in_progress.remove(id);

        let custom_type = Arc::new(CustomType {
            id: id.to_string(),
            title: definition.title.take(),
            description: definition.description.take(),
            definition,
        });
        self.resolved.insert(id.to_string(), Arc::clone(&custom_type));
        Ok(custom_type)
    }

    fn parse_set(
        &mut self,
        owner: &str,
        raw: &RawParameterSet,
    ) -> Result<ParameterSet, DefinitionError> {
        let mut set = ParameterSet::new();
        for (name, schema) in &raw.properties {
            let definition = self.parse_parameter(owner, name, schema)?;
            set.properties.insert(name.clone(), definition);
        }
        set.required = raw.required.clone();
        Ok(set)
    }

    /// Parses a JSON-schema-shaped parameter.
    fn parse_parameter(
        &mut self,
        owner: &str,
        name: &str,
        schema: &Value,
    ) -> Result<ParameterDefinition, DefinitionError> {
        let invalid = |message: &str| DefinitionError::InvalidParameter {
            owner: owner.to_string(),
            parameter: name.to_string(),
            message: message.to_string(),
        };

        let object = schema
            .as_object()
            .ok_or_else(|| invalid("expected a schema object"))?;
        let type_name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("missing string 'type'"))?;

        let kind = if let Some(id) = type_name.strip_prefix(TYPE_REFERENCE_PREFIX) {
            ParameterKind::Custom(self.resolve(owner, id)?)
        } else {
            match type_name {
                "object" => match object.get("properties") {
                    Some(Value::Object(raw_properties)) => {
                        let mut properties = BTreeMap::new();
                        for (property, property_schema) in raw_properties {
                            let parsed = self.parse_parameter(owner, property, property_schema)?;
                            properties.insert(property.clone(), parsed);
                        }
                        let required = object
                            .get("required")
                            .and_then(Value::as_array)
                            .map(|names| {
                                names
                                    .iter()
                                    .filter_map(Value::as_str)
                                    .map(str::to_string)
                                    .collect()
                            })
                            .unwrap_or_default();
                        ParameterKind::TypedObject {
                            properties,
                            required,
                            additional_properties: object
                                .get("additionalProperties")
                                .and_then(Value::as_bool),
                        }
                    }
                    Some(_) => return Err(invalid("'properties' must be an object")),
                    None => ParameterKind::UntypedObject,
                },
                "array" => {
                    let items = object
                        .get("items")
                        .ok_or_else(|| invalid("array parameters need 'items'"))?;
                    ParameterKind::Array {
                        items: Box::new(self.parse_parameter(owner, name, items)?),
                    }
                }
                other => ParameterKind::Primitive(PrimitiveType::from_name(other)),
            }
        };

        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(ParameterDefinition {
            kind,
            title: text("title"),
            description: text("description"),
            hint: text("hint"),
            default: object.get("default").cloned(),
        })
    }
}

impl IntoManifest for RawApp {
    fn into_manifest(self) -> Result<Manifest, DefinitionError> {
        let mut resolver = TypeResolver::new(&self.types);
        let mut builder = Manifest::builder(&self.name);
        if let Some(description) = &self.description {
            builder = builder.with_description(description);
        }
        if let Some(long_description) = &self.long_description {
            builder = builder.with_long_description(long_description);
        }
        if let Some(icon) = &self.icon {
            builder = builder.with_icon(icon);
        }
        let scopes: Vec<&str> = self.bot_scopes.iter().map(String::as_str).collect();
        builder = builder.with_bot_scopes(&scopes);

        for id in self.types.keys() {
            let custom_type = resolver.resolve(id, id)?;
            builder = builder.with_type(&custom_type);
        }

        let mut functions: AHashMap<String, Arc<FunctionDefinition>> = AHashMap::new();
        for (callback_id, raw) in &self.functions {
            let mut function =
                FunctionDefinition::builder(callback_id, &raw.title, &raw.source_file)
                    .with_input_parameters(resolver.parse_set(callback_id, &raw.input_parameters)?)
                    .with_output_parameters(
                        resolver.parse_set(callback_id, &raw.output_parameters)?,
                    );
            if let Some(description) = &raw.description {
                function = function.with_description(description);
            }
            let function = function.build();
            builder = builder.with_function(&function);
            functions.insert(callback_id.clone(), function);
        }

        for (callback_id, raw) in &self.workflows {
            let mut workflow = WorkflowDefinition::builder(callback_id, &raw.title)
                .with_input_parameters(resolver.parse_set(callback_id, &raw.input_parameters)?)
                .with_output_parameters(resolver.parse_set(callback_id, &raw.output_parameters)?);
            if let Some(description) = &raw.description {
                workflow = workflow.with_description(description);
            }
            let mut workflow = workflow.build();

            for step in &raw.steps {
                let local = StepFunction::local_callback_id(&step.function_id)
                    .and_then(|callback_id| functions.get(callback_id));
                let function = match local {
                    Some(definition) => StepFunction::Local(Arc::clone(definition)),
                    None => StepFunction::Reference(step.function_id.clone()),
                };
                let inputs: StepInputs = step.inputs.clone().into_iter().collect();
                workflow.add_step(function, inputs);
            }
            builder = builder.with_workflow(workflow);
        }

        for (name, raw) in &self.datastores {
            let mut datastore = DatastoreDefinition::new(name, &raw.primary_key);
            for (attribute, schema) in &raw.attributes {
                let definition = resolver.parse_parameter(name, attribute, schema)?;
                datastore = datastore.with_attribute(attribute, definition);
            }
            builder = builder.with_datastore(&datastore.build());
        }

        if let Some(providers) = &self.external_auth_providers {
            for (provider_key, raw) in &providers.oauth2 {
                let provider =
                    OAuth2Provider::new(provider_key, raw.provider_type, raw.options.clone());
                builder = builder.with_provider(&provider);
            }
        }

        debug!(app = %self.name, types = resolver.resolved.len(), "Converted app description");
        Ok(builder.build())
    }
}
