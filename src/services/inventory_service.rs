use crate::error::Result;
use crate::models::{
    AnsibleInventory, AuthMethod, ConsulRole, DatabaseServer, DcsEntry, DcsGroups, DcsType,
    FormState, HostGroup, HostMap, HostVars, InventoryAll, InventoryChildren, InventoryVars,
    LocalMachineEnvs, PostgresClusterGroup, ServerHostVars,
};

/// Servers that can be turned into inventory hosts
#[derive(Debug, Clone, Copy)]
pub enum HostSource<'a> {
    DatabaseServers(&'a [DatabaseServer]),
    DcsServers(&'a [DcsEntry]),
}

impl HostSource<'_> {
    fn entries(&self) -> Vec<(&str, &str)> {
        match self {
            HostSource::DatabaseServers(servers) => servers
                .iter()
                .map(|s| (s.ip_address.as_str(), s.hostname.as_str()))
                .collect(),
            HostSource::DcsServers(servers) => servers
                .iter()
                .map(|s| (s.ip_address.as_str(), s.hostname.as_str()))
                .collect(),
        }
    }

    fn is_db_servers(&self) -> bool {
        matches!(self, HostSource::DatabaseServers(_))
    }
}

/// Map servers to inventory hosts keyed by IP address.
///
/// `hostname` is only attached for DCS servers, and only when requested.
/// Servers sharing an IP collapse into one entry holding the last record.
pub fn configure_hosts(source: HostSource<'_>, role: Option<ConsulRole>, add_hostname: bool) -> HostMap {
    let mut hosts = HostMap::new();
    for (ip, hostname) in source.entries() {
        let vars = HostVars {
            ansible_host: ip.to_string(),
            hostname: (add_hostname && !source.is_db_servers()).then(|| hostname.to_string()),
            consul_node_role: role,
        };
        if hosts.insert(ip.to_string(), vars).is_some() {
            tracing::warn!(ip, "duplicate server address, keeping the last entry");
        }
    }
    hosts
}

/// DCS layout of a local machine deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcsPlan {
    /// Standard mode: etcd on the database servers
    StandardEtcd,
    NewEtcd { on_db_servers: bool },
    NewConsul { on_db_servers: bool },
    /// New cluster requested without a DCS type
    NewUnset,
    /// Existing consul cluster; database servers join as clients
    ExistingConsul,
    /// Existing etcd (or untyped) cluster; referenced through extra vars only
    ExistingOther,
}

impl DcsPlan {
    pub fn select(state: &FormState) -> Self {
        if !state.is_expert() {
            return DcsPlan::StandardEtcd;
        }
        let on_db_servers = state.is_deploy_dcs_to_db_servers;
        match (state.is_deploy_new_dcs_cluster, state.dcs_type) {
            (true, Some(DcsType::Etcd)) => DcsPlan::NewEtcd { on_db_servers },
            (true, Some(DcsType::Consul)) => DcsPlan::NewConsul { on_db_servers },
            (true, None) => DcsPlan::NewUnset,
            (false, Some(DcsType::Consul)) => DcsPlan::ExistingConsul,
            (false, Some(DcsType::Etcd)) | (false, None) => DcsPlan::ExistingOther,
        }
    }
}

fn etcd_groups(hosts: HostMap) -> DcsGroups {
    DcsGroups {
        etcd_cluster: Some(HostGroup::new(hosts)),
        consul_instances: HostGroup::empty(),
    }
}

/// `etcd_cluster` / `consul_instances` inventory groups
pub fn construct_dcs_envs(state: &FormState) -> Option<DcsGroups> {
    let db_servers = HostSource::DatabaseServers(&state.database_servers);
    let dcs_servers = HostSource::DcsServers(&state.dcs_databases);
    let plan = DcsPlan::select(state);
    tracing::debug!(?plan, "selected DCS layout");

    match plan {
        DcsPlan::StandardEtcd => Some(etcd_groups(configure_hosts(db_servers, None, false))),
        DcsPlan::NewEtcd { on_db_servers: true } => {
            Some(etcd_groups(configure_hosts(db_servers, None, false)))
        }
        DcsPlan::NewEtcd { on_db_servers: false } => {
            Some(etcd_groups(configure_hosts(dcs_servers, None, true)))
        }
        DcsPlan::NewConsul { on_db_servers } => {
            let hosts = if on_db_servers {
                configure_hosts(db_servers, Some(ConsulRole::Server), false)
            } else {
                let mut hosts = configure_hosts(db_servers, Some(ConsulRole::Client), false);
                hosts.extend(configure_hosts(dcs_servers, Some(ConsulRole::Server), true));
                hosts
            };
            Some(DcsGroups {
                etcd_cluster: Some(HostGroup::empty()),
                consul_instances: HostGroup::new(hosts),
            })
        }
        DcsPlan::NewUnset => Some(DcsGroups {
            etcd_cluster: Some(HostGroup::empty()),
            consul_instances: HostGroup::empty(),
        }),
        DcsPlan::ExistingConsul => Some(DcsGroups {
            etcd_cluster: None,
            consul_instances: HostGroup::new(configure_hosts(
                db_servers,
                Some(ConsulRole::Client),
                false,
            )),
        }),
        DcsPlan::ExistingOther => None,
    }
}

/// `balancers` inventory group
pub fn construct_balancers_envs(state: &FormState) -> HostGroup {
    if !state.is_haproxy_enabled {
        return HostGroup::empty();
    }
    let hosts = if state.is_expert() && !state.is_deploy_balancers_to_db_servers {
        state
            .load_balancer_databases
            .iter()
            .map(|host| {
                (
                    host.ip_address.clone(),
                    HostVars {
                        ansible_host: host.ip_address.clone(),
                        hostname: None,
                        consul_node_role: None,
                    },
                )
            })
            .collect()
    } else {
        configure_hosts(HostSource::DatabaseServers(&state.database_servers), None, false)
    };
    HostGroup::new(hosts)
}

fn server_host_vars(state: &FormState, server: &DatabaseServer) -> ServerHostVars {
    ServerHostVars {
        hostname: server.hostname.clone(),
        ansible_host: server.ip_address.clone(),
        server_location: server.location.clone(),
        // Standard mode assumes every server shares the cluster-level flag.
        postgresql_exists: if state.is_expert() {
            server.is_postgresql_exists
        } else {
            state.is_cluster_exists
        },
    }
}

/// Ansible inventory and SSH key envs of a local machine cluster
pub fn local_machine_envs(state: &FormState, secret_id: Option<i64>) -> Result<LocalMachineEnvs> {
    let master = state.master_server()?;
    let saved_secret = state.uses_saved_secret(secret_id);

    let ssh_private_key_content = match state.authentication_method {
        AuthMethod::Ssh if !saved_secret => state.ssh_private_key.clone(),
        _ => None,
    };

    // Both SSH and sudo passwords are the account password, never the username.
    let password_auth = state.authentication_method == AuthMethod::Password;
    let vars = InventoryVars {
        ansible_user: state.username.clone(),
        ansible_ssh_pass: password_auth.then(|| state.password.clone()).flatten(),
        ansible_sudo_pass: password_auth.then(|| state.password.clone()).flatten(),
    };

    let mut master_hosts = HostMap::new();
    master_hosts.insert(master.ip_address.clone(), server_host_vars(state, master));

    let replica = (state.database_servers.len() > 1).then(|| {
        let mut hosts = HostMap::new();
        for server in &state.database_servers[1..] {
            hosts.insert(server.ip_address.clone(), server_host_vars(state, server));
        }
        HostGroup::new(hosts)
    });

    let children = InventoryChildren {
        balancers: construct_balancers_envs(state),
        dcs: construct_dcs_envs(state),
        master: HostGroup::new(master_hosts),
        replica,
        postgres_cluster: PostgresClusterGroup::default(),
    };

    Ok(LocalMachineEnvs {
        ssh_private_key_content,
        ansible_inventory_json: AnsibleInventory {
            all: InventoryAll { vars, children },
        },
    })
}
