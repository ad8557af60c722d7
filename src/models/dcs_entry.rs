use serde::{Deserialize, Serialize};

/// A host of an external (or separately deployed) etcd/consul cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DcsEntry {
    pub hostname: String,
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}
