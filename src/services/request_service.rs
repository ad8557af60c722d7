use serde_json::{Map, Value};

use crate::error::{MapperError, Result};
use crate::models::{
    AuthInfo, ExtraVars, FormState, LocalMachineEnvs, Provider, RequestParams, RequestPayload,
};
use crate::services::extra_vars_service::{
    base_cluster_extra_vars, cloud_extra_vars, local_machine_extra_vars,
};
use crate::services::inventory_service::local_machine_envs;
use crate::utils::{base64_env_entry, is_truthy, plain_env_entry, value_to_env_string};

/// Secret fields accepted as cloud provider credentials
pub const CLOUD_SECRET_FIELDS: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "GCP_SERVICE_ACCOUNT_CONTENTS",
    "AZURE_SUBSCRIPTION_ID",
    "AZURE_CLIENT_ID",
    "AZURE_SECRET",
    "AZURE_TENANT",
    "DO_API_TOKEN",
    "HCLOUD_API_TOKEN",
];

/// How a request is assembled: where identity fields come from and which
/// deployment route builds `envs` / `extra_vars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestRoute {
    FormCloud,
    FormLocal,
    YamlCloud,
    YamlLocal,
}

impl RequestRoute {
    pub fn select(state: &FormState, custom_extra_vars: Option<&ExtraVars>) -> Self {
        if state.is_yaml() {
            let declares_cloud = custom_extra_vars
                .and_then(|doc| doc.get("cloud_provider"))
                .map(is_truthy)
                .unwrap_or(false);
            if declares_cloud {
                RequestRoute::YamlCloud
            } else {
                RequestRoute::YamlLocal
            }
        } else if state.targets_cloud() {
            RequestRoute::FormCloud
        } else {
            RequestRoute::FormLocal
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, RequestRoute::FormCloud | RequestRoute::YamlCloud)
    }
}

/// `key=base64(value)` for every entry; strings are encoded raw, anything
/// else as JSON text.
pub fn encode_envs_base64(entries: &Map<String, Value>) -> Vec<String> {
    entries
        .iter()
        .map(|(key, value)| base64_env_entry(key, &value_to_env_string(value)))
        .collect()
}

impl LocalMachineEnvs {
    /// Base64 env entries in declaration order
    pub fn to_base64_envs(&self) -> Result<Vec<String>> {
        let mut envs = Vec::new();
        if let Some(key) = &self.ssh_private_key_content {
            envs.push(base64_env_entry("SSH_PRIVATE_KEY_CONTENT", key));
        }
        let inventory = serde_json::to_string(&self.ansible_inventory_json)?;
        envs.push(base64_env_entry("ANSIBLE_INVENTORY_JSON", &inventory));
        Ok(envs)
    }
}

/// Keep only recognised secret fields that carry a value
pub fn filter_cloud_secrets(secrets_info: Option<&Map<String, Value>>) -> Map<String, Value> {
    secrets_info
        .map(|secrets| {
            secrets
                .iter()
                .filter(|(key, value)| CLOUD_SECRET_FIELDS.contains(&key.as_str()) && is_truthy(value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// `envs` and `extra_vars` of a cloud cluster request
pub fn request_cloud_params(
    state: &FormState,
    secrets_info: Option<&Map<String, Value>>,
    custom_extra_vars: Option<&ExtraVars>,
) -> Result<RequestParams> {
    let secrets = filter_cloud_secrets(secrets_info);
    let is_gcp = matches!(state.provider.as_ref().map(|p| &p.code), Some(Provider::Gcp));
    let envs = if is_gcp {
        encode_envs_base64(&secrets)
    } else {
        secrets
            .iter()
            .map(|(key, value)| plain_env_entry(key, &value_to_env_string(value)))
            .collect()
    };

    let extra_vars = match custom_extra_vars {
        Some(custom) => custom.clone(),
        None => base_cluster_extra_vars(state)?.union(cloud_extra_vars(state)?)?,
    };

    Ok(RequestParams {
        envs,
        extra_vars,
        existing_cluster: None,
    })
}

/// `envs`, `extra_vars` and `existing_cluster` of a local machine cluster request
pub fn request_local_machine_params(
    state: &FormState,
    secret_id: Option<i64>,
    custom_extra_vars: Option<&ExtraVars>,
) -> Result<RequestParams> {
    let envs = local_machine_envs(state, secret_id)?.to_base64_envs()?;

    let extra_vars = match custom_extra_vars {
        Some(custom) => custom.clone(),
        None => base_cluster_extra_vars(state)?.union(local_machine_extra_vars(state, secret_id)?)?,
    };

    let existing_cluster = if state.is_yaml() {
        custom_extra_vars
            .and_then(|doc| doc.get("existing_cluster"))
            .map(|value| value_to_env_string(value) == "true")
            .unwrap_or(false)
    } else {
        state.is_cluster_exists
    };

    Ok(RequestParams {
        envs,
        extra_vars,
        existing_cluster: Some(existing_cluster),
    })
}

fn invalid_field(field: &'static str, value: &Value) -> MapperError {
    MapperError::InvalidField {
        field,
        value: value.to_string(),
    }
}

/// Scalar document value as text; numbers and booleans are rendered as written
fn document_text(doc: Option<&ExtraVars>, key: &'static str) -> Result<Option<String>> {
    match doc.and_then(|d| d.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
        Some(other) => Err(invalid_field(key, other)),
    }
}

/// Integer document value; numeric strings are accepted
fn document_id(doc: Option<&ExtraVars>, key: &'static str) -> Result<Option<i64>> {
    match doc.and_then(|d| d.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value @ Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| invalid_field(key, value)),
        Some(value @ Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid_field(key, value)),
        Some(other) => Err(invalid_field(key, other)),
    }
}

/// Build the cluster creation request from the form.
///
/// With a custom document (YAML editor), `environment_id` and `description`
/// are removed from it in place; they travel on the request itself.
pub fn map_form_values_to_request_fields(
    state: &FormState,
    secret_id: Option<i64>,
    project_id: i64,
    secrets_info: Option<&Map<String, Value>>,
    mut custom_extra_vars: Option<&mut ExtraVars>,
) -> Result<RequestPayload> {
    let (name, environment_id, description) = if state.is_yaml() {
        let doc = custom_extra_vars.as_deref();
        (
            document_text(doc, "patroni_cluster_name")?,
            document_id(doc, "environment_id")?,
            document_text(doc, "description")?,
        )
    } else {
        (
            state.cluster_name.clone(),
            state.environment_id,
            state.description.clone(),
        )
    };

    if let Some(doc) = custom_extra_vars.as_deref_mut() {
        if !doc.is_empty() {
            doc.remove("environment_id");
            doc.remove("description");
        }
    }

    let custom = custom_extra_vars.as_deref();
    let route = RequestRoute::select(state, custom);
    tracing::debug!(?route, has_custom = custom.is_some(), "assembling cluster request");

    let params = match route {
        RequestRoute::FormCloud | RequestRoute::YamlCloud => {
            request_cloud_params(state, secrets_info, custom)?
        }
        RequestRoute::FormLocal | RequestRoute::YamlLocal => {
            request_local_machine_params(state, secret_id, custom)?
        }
    };

    Ok(RequestPayload {
        name,
        environment_id,
        description,
        project_id,
        auth_info: secret_id.map(|secret_id| AuthInfo { secret_id }),
        envs: params.envs,
        extra_vars: params.extra_vars,
        existing_cluster: params.existing_cluster,
    })
}

/// Parse a secrets document (JSON object) supplied next to the form
pub fn parse_secrets(raw: &str) -> Result<Map<String, Value>> {
    Ok(serde_json::from_str(raw)?)
}
