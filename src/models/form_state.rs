use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config;
use crate::error::{MapperError, Result};
use crate::models::{
    AuthMethod, BackupMethod, CreationType, DatabaseDefinition, DatabaseServer, DcsEntry, DcsType,
    ExtensionSelection, LoadBalancerHost, PoolDefinition, ProviderInfo,
};

/// Catalog entry with a provider-specific code (instance type, datacenter)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
}

/// Cloud image attached to a datacenter; `image` is flattened into extra vars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudImage {
    #[serde(default)]
    pub image: Map<String, Value>,
}

/// Selected datacenter of a cloud region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_image: Option<CloudImage>,
}

fn default_true() -> bool {
    true
}

fn default_instances_amount() -> Option<u32> {
    Some(config::DEFAULT_INSTANCES_AMOUNT)
}

fn default_storage_amount() -> Option<u32> {
    Some(config::DEFAULT_STORAGE_AMOUNT)
}

fn default_instance_type() -> Option<String> {
    Some(config::DEFAULT_INSTANCE_TYPE.to_string())
}

fn default_file_system_type() -> Option<String> {
    Some(config::DEFAULT_FILE_SYSTEM_TYPE.to_string())
}

fn default_backup_method() -> Option<BackupMethod> {
    Some(BackupMethod::PgBackRest)
}

fn deserialize_dcs_type<'de, D>(deserializer: D) -> std::result::Result<Option<DcsType>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    let dcs_type = code.as_deref().and_then(DcsType::from_code);
    if let (Some(code), None) = (&code, dcs_type) {
        if !code.is_empty() {
            tracing::warn!(code = %code, "unknown DCS type, treating it as unset");
        }
    }
    Ok(dcs_type)
}

fn deserialize_backup_method<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BackupMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code.as_deref().and_then(BackupMethod::from_code))
}

fn default_backup_retention() -> Option<u32> {
    Some(config::DEFAULT_BACKUP_RETENTION)
}

fn default_backup_start_time() -> Option<u32> {
    Some(config::DEFAULT_BACKUP_START_TIME)
}

/// Values of the cluster creation form.
///
/// Keys follow the form's camelCase vocabulary. Absent fields fall back to the
/// form defaults; advanced fields are only read when `expert_mode` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(default)]
    pub creation_type: CreationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_mode: Option<bool>,

    // Cluster identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderInfo>,
    #[serde(default, rename = "environment", skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres_version: Option<Value>,

    // Cloud instances and storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_config: Option<RegionConfig>,
    #[serde(default = "default_instance_type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_config: Option<CatalogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    #[serde(default = "default_instances_amount", skip_serializing_if = "Option::is_none")]
    pub instances_amount: Option<u32>,
    #[serde(default = "default_storage_amount", skip_serializing_if = "Option::is_none")]
    pub storage_amount: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
    #[serde(default = "default_file_system_type", skip_serializing_if = "Option::is_none")]
    pub file_system_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(default)]
    pub is_spot_instances: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_network: Option<String>,
    #[serde(default)]
    pub is_db_public_access: bool,
    #[serde(default = "default_true")]
    pub is_cloud_load_balancer: bool,

    // Local machines
    #[serde(default)]
    pub database_servers: Vec<DatabaseServer>,
    #[serde(default, rename = "existingCluster")]
    pub is_cluster_exists: bool,
    #[serde(default)]
    pub authentication_method: AuthMethod,
    #[serde(default)]
    pub is_use_defined_secret: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_private_key: Option<String>,
    #[serde(default, rename = "clusterVIPAddress", skip_serializing_if = "Option::is_none")]
    pub cluster_vip_address: Option<String>,
    #[serde(default, rename = "isHaproxyLoadBalancer")]
    pub is_haproxy_enabled: bool,
    #[serde(default = "default_true")]
    pub is_deploy_balancers_to_db_servers: bool,
    #[serde(default)]
    pub load_balancer_databases: Vec<LoadBalancerHost>,

    // DCS
    #[serde(
        default,
        deserialize_with = "deserialize_dcs_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub dcs_type: Option<DcsType>,
    #[serde(default = "default_true")]
    pub is_deploy_new_dcs_cluster: bool,
    #[serde(default = "default_true")]
    pub is_deploy_dcs_to_db_servers: bool,
    #[serde(default)]
    pub dcs_databases: Vec<DcsEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_directory: Option<String>,

    // Databases, pooling and extensions
    #[serde(default)]
    pub databases: Vec<DatabaseDefinition>,
    #[serde(default = "default_true")]
    pub is_connection_pooler_enabled: bool,
    #[serde(default)]
    pub pools: Vec<PoolDefinition>,
    #[serde(default = "default_true")]
    pub is_netdata_monitoring: bool,
    #[serde(default)]
    pub extensions: BTreeMap<String, ExtensionSelection>,

    // Backups
    #[serde(default = "default_true")]
    pub is_backups_enabled: bool,
    #[serde(
        default = "default_backup_method",
        deserialize_with = "deserialize_backup_method",
        skip_serializing_if = "Option::is_none"
    )]
    pub backup_method: Option<BackupMethod>,
    #[serde(default = "default_backup_start_time", skip_serializing_if = "Option::is_none")]
    pub backup_start_time: Option<u32>,
    #[serde(default = "default_backup_retention", skip_serializing_if = "Option::is_none")]
    pub backup_retention: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_secret_key: Option<String>,

    // Tuning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres_parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_parameters: Option<String>,
    #[serde(default)]
    pub sync_standby_nodes: u32,
    #[serde(default)]
    pub is_sync_mode_strict: bool,
}

impl FormState {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| MapperError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Expert mode as stated by the document, or the configured default
    pub fn is_expert(&self) -> bool {
        self.expert_mode.unwrap_or_else(config::get_expert_mode)
    }

    pub fn is_yaml(&self) -> bool {
        self.creation_type == CreationType::Yaml
    }

    pub fn provider_info(&self) -> Result<&ProviderInfo> {
        self.provider.as_ref().ok_or(MapperError::MissingField("provider"))
    }

    /// True when the form selects a cloud provider rather than local machines
    pub fn targets_cloud(&self) -> bool {
        self.provider.as_ref().map(|p| !p.code.is_local()).unwrap_or(true)
    }

    pub fn master_server(&self) -> Result<&DatabaseServer> {
        self.database_servers.first().ok_or(MapperError::NoDatabaseServers)
    }

    /// Whether a saved secret replaces the credentials typed into the form
    pub fn uses_saved_secret(&self, secret_id: Option<i64>) -> bool {
        secret_id.is_some() || self.is_use_defined_secret
    }
}
