pub mod normalizer;
pub mod renderer;
pub mod sample;
pub mod scanner;

use serde_json::Value;
use std::collections::BTreeMap;

pub use normalizer::prepare_for_substitution;
pub use renderer::{render, Escape, TemplateRenderer, CURRENT_DATE_VARIABLE};
pub use sample::{synthesize, SampleData};
pub use scanner::{extract_variables, has_variables};

/// Variable name to value. `None` marks a known variable without a value,
/// which renders as an empty string.
pub type ValueMap = BTreeMap<String, Option<String>>;

/// Coerces a JSON value into a placeholder value.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Builds a [`ValueMap`] from the members of a JSON object. Anything other
/// than an object yields an empty map.
pub fn values_from_json(value: &Value) -> ValueMap {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect()
        })
        .unwrap_or_default()
}
