use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationType {
    #[default]
    Form,
    Yaml,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    #[default]
    Ssh,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DcsType {
    Etcd,
    Consul,
}

impl DcsType {
    /// Known DCS types; anything else leaves the type unset
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "etcd" => Some(DcsType::Etcd),
            "consul" => Some(DcsType::Consul),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackupMethod {
    #[default]
    #[serde(rename = "pgbackrest")]
    PgBackRest,
    #[serde(rename = "wal_g")]
    WalG,
}

impl BackupMethod {
    /// An empty code selects no method; every method other than pgbackrest
    /// is configured through wal_g.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "" => None,
            "pgbackrest" => Some(BackupMethod::PgBackRest),
            _ => Some(BackupMethod::WalG),
        }
    }
}

/// Role written into `consul_node_role` for consul inventory hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsulRole {
    Server,
    Client,
}
