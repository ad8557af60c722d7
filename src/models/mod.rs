pub mod database_definition;
pub mod database_server;
pub mod dcs_entry;
pub mod extension;
pub mod extra_vars;
pub mod form_state;
pub mod inventory;
pub mod options;
pub mod parameter;
pub mod provider;
pub mod request_payload;

// Re-export all models for convenient access
pub use database_definition::{DatabaseDefinition, PoolDefinition};
pub use database_server::{DatabaseServer, LoadBalancerHost};
pub use dcs_entry::DcsEntry;
pub use extension::{ExtensionBinding, ExtensionSelection, ResolvedExtensions};
pub use extra_vars::ExtraVars;
pub use form_state::{CatalogEntry, CloudImage, FormState, RegionConfig};
pub use inventory::{
    AnsibleInventory, DcsGroups, EmptyGroup, HostGroup, HostMap, HostVars, InventoryAll,
    InventoryChildren, InventoryVars, LocalMachineEnvs, PostgresClusterChildren,
    PostgresClusterGroup, ServerHostVars,
};
pub use options::{AuthMethod, BackupMethod, ConsulRole, CreationType, DcsType};
pub use parameter::{Parameter, ParameterBlock};
pub use provider::{Provider, ProviderInfo};
pub use request_payload::{AuthInfo, RequestParams, RequestPayload};
