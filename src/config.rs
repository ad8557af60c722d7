use std::env;
use std::path::Path;

use crate::utils::parse_flag;

// Default configuration constants
pub const DEFAULT_PROJECT_ID: i64 = 1;
pub const DEFAULT_EXPERT_MODE: bool = false;
pub const DEFAULT_INSTANCES_AMOUNT: u32 = 3;
pub const DEFAULT_STORAGE_AMOUNT: u32 = 100;
pub const DEFAULT_INSTANCE_TYPE: &str = "small";
pub const DEFAULT_FILE_SYSTEM_TYPE: &str = "ext4";
pub const DEFAULT_BACKUP_RETENTION: u32 = 30;
pub const DEFAULT_BACKUP_START_TIME: u32 = 1;
pub const CONSUL_PORTS_SERF_LAN: u16 = 8301;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Whether documents that do not set `expertMode` are treated as expert forms
pub fn get_expert_mode() -> bool {
    let raw = env::var("CLUSTERFORM_EXPERT_MODE").ok();
    parse_flag(raw.as_ref(), DEFAULT_EXPERT_MODE)
}

pub fn get_default_project_id() -> i64 {
    env::var("CLUSTERFORM_PROJECT_ID")
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PROJECT_ID)
}

pub fn get_default_secret_id() -> Option<i64> {
    env::var("CLUSTERFORM_SECRET_ID")
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}
