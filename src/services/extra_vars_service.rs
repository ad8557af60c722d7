use serde::Serialize;
use serde_json::Value;

use crate::config::CONSUL_PORTS_SERF_LAN;
use crate::error::{MapperError, Result};
use crate::models::{
    AuthMethod, BackupMethod, DcsType, ExtraVars, FormState, ParameterBlock,
};
use crate::services::extension_service::resolve_extensions;
use crate::services::parameter_service::parse_non_empty_block;

/// Instance type value that switches `server_type` to the free-text field
pub const CUSTOM_INSTANCE_TYPE: &str = "custom";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn flag(enabled: bool) -> Option<bool> {
    enabled.then_some(true)
}

#[derive(Serialize)]
struct CommonSection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    postgresql_version: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patroni_cluster_name: Option<&'a str>,
}

/// `postgresql_version` and `patroni_cluster_name`, shared by every route
pub fn common_extra_vars(state: &FormState) -> Result<ExtraVars> {
    ExtraVars::from_section(&CommonSection {
        postgresql_version: state.postgres_version.as_ref(),
        patroni_cluster_name: state.cluster_name.as_deref(),
    })
}

#[derive(Serialize)]
struct CloudSection<'a> {
    cloud_provider: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_type: Option<&'a str>,
    server_location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ansible_user: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh_public_keys: Option<Vec<String>>,
}

#[derive(Serialize)]
struct CloudExpertSection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    postgresql_data_dir_mount_fstype: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume_type: Option<&'a str>,
    database_public_access: bool,
    cloud_load_balancer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_spot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_network: Option<&'a str>,
}

/// Split the SSH key block into one single-quoted entry per line
pub fn quote_ssh_public_keys(raw: &str) -> Vec<String> {
    raw.split(['\n', '\r'])
        .filter(|key| !key.trim().is_empty())
        .map(|key| format!("'{}'", key))
        .collect()
}

/// Extra vars of a cloud provider cluster
pub fn cloud_extra_vars(state: &FormState) -> Result<ExtraVars> {
    let provider = &state.provider_info()?.code;
    let region = state
        .region_config
        .as_ref()
        .ok_or(MapperError::MissingField("regionConfig"))?;

    let server_type = if state.instance_type.as_deref() == Some(CUSTOM_INSTANCE_TYPE) {
        state.server_type.as_deref()
    } else {
        let config = state
            .instance_config
            .as_ref()
            .ok_or(MapperError::MissingField("instanceConfig"))?;
        Some(config.code.as_str())
    };

    let section = CloudSection {
        cloud_provider: provider.code(),
        server_type,
        server_location: &region.code,
        server_count: state.instances_amount,
        volume_size: state.storage_amount,
        ansible_user: provider.ansible_user(),
        ssh_public_keys: non_empty(&state.ssh_public_key).map(quote_ssh_public_keys),
    };

    let mut vars = common_extra_vars(state)?.with_section(&section)?;
    if let Some(image) = &region.cloud_image {
        vars = vars.union(ExtraVars::from(image.image.clone()))?;
    }

    if state.is_expert() {
        vars = vars.with_section(&CloudExpertSection {
            postgresql_data_dir_mount_fstype: state.file_system_type.as_deref(),
            volume_type: state.volume_type.as_deref(),
            database_public_access: state.is_db_public_access,
            cloud_load_balancer: state.is_cloud_load_balancer,
            server_spot: flag(provider.supports_spot_instances() && state.is_spot_instances),
            server_network: non_empty(&state.server_network),
        })?;
    }
    Ok(vars)
}

#[derive(Serialize)]
struct LocalSection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cluster_vip: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    with_haproxy_load_balancing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_cluster: Option<bool>,
}

#[derive(Serialize)]
struct InlineCredentialsSection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    ansible_user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ansible_ssh_pass: Option<&'a str>,
}

#[derive(Serialize)]
struct EtcdHost<'a> {
    host: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<&'a str>,
}

/// Connection data of a DCS cluster that already exists
#[derive(Serialize)]
#[serde(untagged)]
enum ExistingDcsSection<'a> {
    Etcd {
        dcs_exists: bool,
        patroni_etcd_hosts: Vec<EtcdHost<'a>>,
    },
    Consul {
        dcs_exists: bool,
        consul_join: Vec<&'a str>,
        consul_ports_serf_lan: u16,
    },
}

impl<'a> ExistingDcsSection<'a> {
    fn from_state(state: &'a FormState) -> Self {
        match state.dcs_type {
            Some(DcsType::Etcd) => ExistingDcsSection::Etcd {
                dcs_exists: true,
                patroni_etcd_hosts: state
                    .dcs_databases
                    .iter()
                    .map(|entry| EtcdHost {
                        host: &entry.ip_address,
                        port: entry.port.as_deref(),
                    })
                    .collect(),
            },
            Some(DcsType::Consul) | None => ExistingDcsSection::Consul {
                dcs_exists: true,
                consul_join: state
                    .dcs_databases
                    .iter()
                    .map(|entry| entry.ip_address.as_str())
                    .collect(),
                consul_ports_serf_lan: CONSUL_PORTS_SERF_LAN,
            },
        }
    }
}

#[derive(Serialize)]
struct LocalExpertSection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    dcs_type: Option<DcsType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postgresql_data_dir: Option<&'a str>,
}

/// Extra vars of a cluster deployed on local machines
pub fn local_machine_extra_vars(state: &FormState, secret_id: Option<i64>) -> Result<ExtraVars> {
    let mut vars = common_extra_vars(state)?.with_section(&LocalSection {
        cluster_vip: non_empty(&state.cluster_vip_address),
        with_haproxy_load_balancing: flag(state.is_haproxy_enabled),
        existing_cluster: flag(state.is_cluster_exists),
    })?;

    if !state.uses_saved_secret(secret_id) && state.authentication_method == AuthMethod::Password {
        vars = vars.with_section(&InlineCredentialsSection {
            ansible_user: state.username.as_deref(),
            ansible_ssh_pass: state.password.as_deref(),
        })?;
    }

    if state.is_expert() {
        vars = vars.with_section(&LocalExpertSection {
            dcs_type: state.dcs_type,
            postgresql_data_dir: state.data_directory.as_deref(),
        })?;
        if !state.is_deploy_new_dcs_cluster {
            vars = vars.with_section(&ExistingDcsSection::from_state(state))?;
        }
    }
    Ok(vars)
}

#[derive(Serialize)]
struct BaseSection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    environment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct PostgresDatabase<'a> {
    db: &'a str,
    owner: &'a str,
    encoding: &'a str,
    lc_ctype: &'a str,
    lc_collate: &'a str,
}

#[derive(Serialize)]
struct PostgresUser<'a> {
    name: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct PoolParameters<'a> {
    pool_size: u32,
    pool_mode: &'a str,
}

#[derive(Serialize)]
struct PgbouncerPool<'a> {
    name: &'a str,
    dbname: &'a str,
    pool_parameters: PoolParameters<'a>,
}

#[derive(Serialize)]
struct DatabasesSection<'a> {
    postgresql_databases: Vec<PostgresDatabase<'a>>,
    postgresql_users: Vec<PostgresUser<'a>>,
    pgbouncer_install: bool,
    netdata_install: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgbouncer_pools: Option<Vec<PgbouncerPool<'a>>>,
}

impl<'a> DatabasesSection<'a> {
    fn from_state(state: &'a FormState) -> Self {
        DatabasesSection {
            postgresql_databases: state
                .databases
                .iter()
                .map(|db| PostgresDatabase {
                    db: &db.database_name,
                    owner: &db.user_name,
                    encoding: &db.encoding,
                    lc_ctype: &db.locale,
                    lc_collate: &db.locale,
                })
                .collect(),
            postgresql_users: state
                .databases
                .iter()
                .map(|db| PostgresUser {
                    name: &db.user_name,
                    password: &db.user_password,
                })
                .collect(),
            pgbouncer_install: state.is_connection_pooler_enabled,
            netdata_install: state.is_netdata_monitoring,
            pgbouncer_pools: state.is_connection_pooler_enabled.then(|| {
                state
                    .pools
                    .iter()
                    .map(|pool| PgbouncerPool {
                        name: &pool.pool_name,
                        dbname: &pool.pool_name,
                        pool_parameters: PoolParameters {
                            pool_size: pool.pool_size,
                            pool_mode: &pool.pool_mode,
                        },
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Serialize)]
struct PgBackRestConf {
    global: ParameterBlock,
}

#[derive(Serialize)]
struct PgBackRestSection<'a> {
    pgbackrest_install: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgbackrest_backup_hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgbackrest_retention_full: Option<u32>,
    pgbackrest_retention_full_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgbackrest_auto_conf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgbackrest_conf: Option<PgBackRestConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgbackrest_s3_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgbackrest_s3_key_secret: Option<&'a str>,
}

#[derive(Serialize)]
struct WalGSection<'a> {
    wal_g_install: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    wal_g_backup_hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wal_g_retention_full: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wal_g_auto_conf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wal_g_json: Option<ParameterBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wal_g_aws_access_key_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wal_g_aws_secret_access_key: Option<&'a str>,
}

#[derive(Serialize)]
struct DisabledBackupsSection {
    pgbackrest_install: bool,
    pgbackrest_auto_conf: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BackupSection<'a> {
    PgBackRest(PgBackRestSection<'a>),
    WalG(WalGSection<'a>),
    Disabled(DisabledBackupsSection),
}

impl<'a> BackupSection<'a> {
    fn from_state(state: &'a FormState) -> Self {
        let method = match state.backup_method {
            Some(method) if state.is_backups_enabled => method,
            _ => {
                return BackupSection::Disabled(DisabledBackupsSection {
                    pgbackrest_install: false,
                    pgbackrest_auto_conf: false,
                })
            }
        };
        let config = parse_non_empty_block(state.backup_config.as_deref());
        let with_s3 = state
            .provider
            .as_ref()
            .map(|p| p.code.needs_s3_credentials())
            .unwrap_or(false);
        let access_key = state.backup_access_key.as_deref().filter(|_| with_s3);
        let secret_key = state.backup_secret_key.as_deref().filter(|_| with_s3);

        match method {
            BackupMethod::PgBackRest => BackupSection::PgBackRest(PgBackRestSection {
                pgbackrest_install: true,
                pgbackrest_backup_hour: state.backup_start_time,
                pgbackrest_retention_full: state.backup_retention,
                pgbackrest_retention_full_type: "time",
                pgbackrest_auto_conf: config.as_ref().map(|_| false),
                pgbackrest_conf: config.map(|global| PgBackRestConf { global }),
                pgbackrest_s3_key: access_key,
                pgbackrest_s3_key_secret: secret_key,
            }),
            BackupMethod::WalG => BackupSection::WalG(WalGSection {
                wal_g_install: true,
                wal_g_backup_hour: state.backup_start_time,
                wal_g_retention_full: state.backup_retention,
                wal_g_auto_conf: config.as_ref().map(|_| false),
                wal_g_json: config,
                wal_g_aws_access_key_id: access_key,
                wal_g_aws_secret_access_key: secret_key,
            }),
        }
    }
}

#[derive(Serialize)]
struct SysctlConf {
    postgres_cluster: ParameterBlock,
}

#[derive(Serialize)]
struct TuningSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    local_postgresql_parameters: Option<ParameterBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sysctl_set: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sysctl_conf: Option<SysctlConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    synchronous_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    synchronous_node_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    synchronous_mode_strict: Option<bool>,
}

impl TuningSection {
    fn from_state(state: &FormState) -> Self {
        let kernel = parse_non_empty_block(state.kernel_parameters.as_deref());
        let sync = state.sync_standby_nodes > 0;
        TuningSection {
            local_postgresql_parameters: parse_non_empty_block(
                state.postgres_parameters.as_deref(),
            ),
            sysctl_set: kernel.as_ref().map(|_| true),
            sysctl_conf: kernel.map(|postgres_cluster| SysctlConf { postgres_cluster }),
            synchronous_mode: flag(sync),
            synchronous_node_count: sync.then_some(state.sync_standby_nodes),
            synchronous_mode_strict: flag(sync && state.is_sync_mode_strict),
        }
    }
}

/// Extra vars shared by cloud and local clusters.
///
/// Standard mode only carries `environment_id` and `description`.
pub fn base_cluster_extra_vars(state: &FormState) -> Result<ExtraVars> {
    let base = ExtraVars::from_section(&BaseSection {
        environment_id: state.environment_id,
        description: state.description.as_deref(),
    })?;
    if !state.is_expert() {
        return Ok(base);
    }

    let extensions = resolve_extensions(&state.extensions, &state.databases)?;
    base.with_section(&DatabasesSection::from_state(state))?
        .union(extensions.into_extra_vars()?)?
        .with_section(&BackupSection::from_state(state))?
        .with_section(&TuningSection::from_state(state))
}

/// Cloud or local vars depending on the selected provider, without a saved secret
pub fn target_extra_vars(state: &FormState) -> Result<ExtraVars> {
    if state.targets_cloud() {
        cloud_extra_vars(state)
    } else {
        local_machine_extra_vars(state, None)
    }
}
