use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MapperError, Result};

/// Provisioning parameters handed to the orchestration engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraVars(Map<String, Value>);

impl ExtraVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a typed section into extra vars. The section must
    /// serialize to a JSON object.
    pub fn from_section<T: Serialize>(section: &T) -> Result<Self> {
        match serde_json::to_value(section)? {
            Value::Object(map) => Ok(ExtraVars(map)),
            Value::Null => Ok(ExtraVars::new()),
            other => Err(MapperError::Json(serde::ser::Error::custom(format!(
                "extra vars section must be an object, got {}",
                other
            )))),
        }
    }

    /// Field union of two sections. A key present on both sides must carry
    /// the same value.
    pub fn union(mut self, other: ExtraVars) -> Result<Self> {
        for (key, value) in other.0 {
            match self.0.get(&key) {
                Some(existing) if *existing != value => {
                    return Err(MapperError::KeyCollision(key));
                }
                _ => {
                    self.0.insert(key, value);
                }
            }
        }
        Ok(self)
    }

    /// Union with a typed section
    pub fn with_section<T: Serialize>(self, section: &T) -> Result<Self> {
        self.union(ExtraVars::from_section(section)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ExtraVars {
    fn from(map: Map<String, Value>) -> Self {
        ExtraVars(map)
    }
}
