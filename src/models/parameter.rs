use serde::{Deserialize, Serialize};

/// One `option: value` line of a free-text parameter block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub option: String,
    pub value: String,
}

/// Result of parsing a parameter block. Empty input is handed back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterBlock {
    Raw(String),
    Parsed(Vec<Parameter>),
}
