use serde_json::Value;

use crate::error::Result;
use crate::models::{ExtraVars, FormState};
use crate::services::extra_vars_service::{base_cluster_extra_vars, target_extra_vars};

/// Extra vars shown in the YAML editor for the current form
pub fn map_form_values_to_yaml_editor(state: &FormState) -> Result<ExtraVars> {
    base_cluster_extra_vars(state)?.union(target_extra_vars(state)?)
}

pub fn render_yaml(vars: &ExtraVars) -> Result<String> {
    Ok(serde_yaml::to_string(vars)?)
}

/// Parse the YAML editor text into a custom extra-vars document.
///
/// Invalid YAML is logged and yields `None`, as does any document that is
/// not a mapping.
pub fn parse_yaml_editor_values(text: &str) -> Option<ExtraVars> {
    let parsed: Value = match serde_yaml::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(%e, "Failed to parse YAML editor content");
            return None;
        }
    };
    match parsed {
        Value::Object(map) => Some(ExtraVars::from(map)),
        Value::Null => None,
        other => {
            tracing::warn!(kind = %value_kind(&other), "YAML editor content is not a mapping");
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
