//! Mapping engine of the cluster provisioning console.
//!
//! Turns the values of the cluster creation form into the request body of
//! the cluster creation call: cloud `extra_vars`, the Ansible inventory of
//! local machine clusters, base64 `envs`, and the YAML editor preview.
//!
//! ```
//! use clusterform::models::FormState;
//! use clusterform::services::map_form_values_to_request_fields;
//!
//! let state = FormState::from_json_str(r#"{
//!     "expertMode": false,
//!     "provider": {"code": "local"},
//!     "clusterName": "pg-main",
//!     "databaseServers": [{"hostname": "pg1", "ipAddress": "10.0.0.1", "location": "dc1"}]
//! }"#).unwrap();
//! let request = map_form_values_to_request_fields(&state, None, 1, None, None).unwrap();
//! assert_eq!(request.name.as_deref(), Some("pg-main"));
//! assert_eq!(request.existing_cluster, Some(false));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{MapperError, Result};
