use serde::{Deserialize, Serialize};

use crate::models::ExtraVars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub secret_id: i64,
}

/// `envs` / `extra_vars` part of a request, produced by either route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParams {
    pub envs: Vec<String>,
    pub extra_vars: ExtraVars,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_cluster: Option<bool>,
}

/// Body of the cluster creation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_info: Option<AuthInfo>,
    pub envs: Vec<String>,
    pub extra_vars: ExtraVars,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_cluster: Option<bool>,
}
