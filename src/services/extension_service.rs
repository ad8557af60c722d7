use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{MapperError, Result};
use crate::models::{
    DatabaseDefinition, ExtensionBinding, ExtensionSelection, ExtraVars, ResolvedExtensions,
};

/// Turn the extensions selection into `postgresql_extensions` entries.
///
/// Database indexes are positions in `databases`. Extensions without any
/// database are dropped; third-party ones also get an `enable_<name>: true`
/// extra var.
pub fn resolve_extensions(
    extensions: &BTreeMap<String, ExtensionSelection>,
    databases: &[DatabaseDefinition],
) -> Result<ResolvedExtensions> {
    let mut resolved = ResolvedExtensions::default();
    for (name, selection) in extensions {
        if selection.db.is_empty() {
            continue;
        }
        for &index in &selection.db {
            let database = databases
                .get(index)
                .ok_or_else(|| MapperError::DatabaseIndexOutOfRange {
                    extension: name.clone(),
                    index,
                    available: databases.len(),
                })?;
            resolved.db.push(ExtensionBinding {
                ext: name.clone(),
                db: database.database_name.clone(),
            });
        }
        if selection.is_third_party {
            resolved
                .extra_vars
                .insert(format!("enable_{}", name), Value::Bool(true));
        }
    }
    tracing::debug!(count = resolved.db.len(), "resolved extension bindings");
    Ok(resolved)
}

impl ResolvedExtensions {
    /// `postgresql_extensions` (when non-empty) plus the third-party flags
    pub fn into_extra_vars(self) -> Result<ExtraVars> {
        let mut vars = ExtraVars::new();
        if !self.db.is_empty() {
            vars.insert("postgresql_extensions", serde_json::to_value(&self.db)?);
        }
        vars.union(self.extra_vars)
    }
}
