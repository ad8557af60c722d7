use serde::{Deserialize, Serialize};

/// A database host entered in the local machine form.
/// The first server of the list becomes the master.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseServer {
    pub hostname: String,
    pub ip_address: String,
    pub location: String,
    pub is_postgresql_exists: bool,
}

/// A dedicated HAProxy host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadBalancerHost {
    pub ip_address: String,
}
