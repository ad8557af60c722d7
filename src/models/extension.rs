use serde::{Deserialize, Serialize};

use crate::models::ExtraVars;

/// Extension choice from the expert form: which databases (by index into
/// the databases list) should get it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionSelection {
    pub db: Vec<usize>,
    pub is_third_party: bool,
}

/// `{ext, db}` element of `postgresql_extensions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionBinding {
    pub ext: String,
    pub db: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedExtensions {
    pub db: Vec<ExtensionBinding>,
    pub extra_vars: ExtraVars,
}
