//! Database configuration handed to generators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key holding the target database (InfluxQL `db`, Flux bucket).
pub const DATABASE_NAME: &str = "database-name";

/// Named configuration values for the database under test.
///
/// Only [`DATABASE_NAME`] is required; other keys are carried through for
/// drivers that need them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseConfig(BTreeMap<String, String>);

impl DatabaseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with only the database name set.
    pub fn with_database_name(name: impl Into<String>) -> Self {
        let mut config = Self::new();
        config.insert(DATABASE_NAME, name);
        config
    }

    /// Parse `key=value` pairs. Returns the offending entry on failure.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected key=value, got '{pair}'"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(format!("Empty key in '{pair}'"));
            }
            config.insert(key, value.trim());
        }
        Ok(config)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn database_name(&self) -> Option<&str> {
        self.get(DATABASE_NAME)
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: DatabaseConfig) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
