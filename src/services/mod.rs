pub mod extension_service;
pub mod extra_vars_service;
pub mod inventory_service;
pub mod parameter_service;
pub mod request_service;
pub mod yaml_service;

// Re-export commonly used functions
pub use extension_service::resolve_extensions;
pub use extra_vars_service::{
    base_cluster_extra_vars, cloud_extra_vars, common_extra_vars, local_machine_extra_vars,
    target_extra_vars,
};
pub use inventory_service::{
    configure_hosts, construct_balancers_envs, construct_dcs_envs, local_machine_envs, DcsPlan,
    HostSource,
};
pub use parameter_service::parse_parameter_block;
pub use request_service::{
    map_form_values_to_request_fields, request_cloud_params, request_local_machine_params,
    RequestRoute,
};
pub use yaml_service::{map_form_values_to_yaml_editor, parse_yaml_editor_values, render_yaml};
