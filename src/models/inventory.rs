use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ConsulRole;

/// Host vars of balancer and DCS inventory entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVars {
    pub ansible_host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consul_node_role: Option<ConsulRole>,
}

/// Host vars of `master` and `replica` entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHostVars {
    pub hostname: String,
    pub ansible_host: String,
    pub server_location: String,
    pub postgresql_exists: bool,
}

/// Inventory hosts keyed by IP address
pub type HostMap<V = HostVars> = BTreeMap<String, V>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup<V = HostVars> {
    pub hosts: HostMap<V>,
}

impl<V> HostGroup<V> {
    pub fn new(hosts: HostMap<V>) -> Self {
        HostGroup { hosts }
    }

    pub fn empty() -> Self {
        HostGroup {
            hosts: BTreeMap::new(),
        }
    }
}

/// DCS part of the inventory children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcsGroups {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etcd_cluster: Option<HostGroup>,
    pub consul_instances: HostGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyGroup {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresClusterChildren {
    pub master: EmptyGroup,
    pub replica: EmptyGroup,
}

/// Static group tying master and replica together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresClusterGroup {
    pub children: PostgresClusterChildren,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryChildren {
    pub balancers: HostGroup,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub dcs: Option<DcsGroups>,
    pub master: HostGroup<ServerHostVars>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica: Option<HostGroup<ServerHostVars>>,
    pub postgres_cluster: PostgresClusterGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryVars {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_ssh_pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_sudo_pass: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAll {
    pub vars: InventoryVars,
    pub children: InventoryChildren,
}

/// Ansible inventory in JSON form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsibleInventory {
    pub all: InventoryAll,
}

/// Environment of a local machine deployment before env encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMachineEnvs {
    #[serde(rename = "SSH_PRIVATE_KEY_CONTENT", default, skip_serializing_if = "Option::is_none")]
    pub ssh_private_key_content: Option<String>,
    #[serde(rename = "ANSIBLE_INVENTORY_JSON")]
    pub ansible_inventory_json: AnsibleInventory,
}
