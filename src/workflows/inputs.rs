use crate::reference::PathReference;
use crate::variable::{ObjectVariable, ParameterVariable};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single step input: a literal, a placeholder, or a structure mixing both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepInput {
    Literal(Value),
    Variable(ParameterVariable),
    List(Vec<StepInput>),
    Map(BTreeMap<String, StepInput>),
}

impl StepInput {
    /// Serializes to plain JSON, turning every placeholder into its `{{path}}` string.
    pub fn templatize(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl From<Value> for StepInput {
    fn from(value: Value) -> Self {
        StepInput::Literal(value)
    }
}

impl From<&str> for StepInput {
    fn from(value: &str) -> Self {
        StepInput::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for StepInput {
    fn from(value: String) -> Self {
        StepInput::Literal(Value::String(value))
    }
}

impl From<bool> for StepInput {
    fn from(value: bool) -> Self {
        StepInput::Literal(Value::Bool(value))
    }
}

impl From<i64> for StepInput {
    fn from(value: i64) -> Self {
        StepInput::Literal(Value::from(value))
    }
}

impl From<f64> for StepInput {
    fn from(value: f64) -> Self {
        StepInput::Literal(Value::from(value))
    }
}

impl From<ParameterVariable> for StepInput {
    fn from(variable: ParameterVariable) -> Self {
        StepInput::Variable(variable)
    }
}

impl From<ObjectVariable> for StepInput {
    fn from(object: ObjectVariable) -> Self {
        StepInput::Variable(ParameterVariable::Object(object))
    }
}

impl From<PathReference> for StepInput {
    fn from(reference: PathReference) -> Self {
        StepInput::Variable(ParameterVariable::Leaf(reference))
    }
}

impl From<Vec<StepInput>> for StepInput {
    fn from(items: Vec<StepInput>) -> Self {
        StepInput::List(items)
    }
}

impl From<BTreeMap<String, StepInput>> for StepInput {
    fn from(entries: BTreeMap<String, StepInput>) -> Self {
        StepInput::Map(entries)
    }
}

/// The named inputs of a workflow step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInputs(BTreeMap<String, StepInput>);

impl StepInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<StepInput>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<StepInput>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&StepInput> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StepInput)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts every input into its wire form.
    pub fn templatize(&self) -> Result<Map<String, Value>, serde_json::Error> {
        self.0
            .iter()
            .map(|(name, input)| Ok((name.clone(), input.templatize()?)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<StepInput>> FromIterator<(K, V)> for StepInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literals_pass_through_and_placeholders_render() {
        let channel = ParameterVariable::Leaf(PathReference::new(["inputs", "channel"]));
        let nested: BTreeMap<String, StepInput> = [
            ("to".to_string(), StepInput::from(channel.clone())),
            ("retries".to_string(), StepInput::from(3i64)),
        ]
        .into_iter()
        .collect();

        let inputs = StepInputs::new()
            .with("channel_id", channel)
            .with("message", "hello")
            .with("options", nested)
            .with("flags", vec![StepInput::from(true), StepInput::from(json!(null))]);

        let templatized = inputs.templatize().unwrap();
        assert_eq!(templatized["channel_id"], json!("{{inputs.channel}}"));
        assert_eq!(templatized["message"], json!("hello"));
        assert_eq!(templatized["options"], json!({"to": "{{inputs.channel}}", "retries": 3}));
        assert_eq!(templatized["flags"], json!([true, null]));
    }
}
