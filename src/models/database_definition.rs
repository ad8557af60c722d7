use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseDefinition {
    pub database_name: String,
    pub user_name: String,
    pub user_password: String,
    pub encoding: String,
    pub locale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoolDefinition {
    pub pool_name: String,
    pub pool_size: u32,
    pub pool_mode: String,
}
