//! Server information

use serde::{Deserialize, Serialize};

/// Server version as reported by `_api/version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVersion {
    /// Server product name, normally `arango`
    pub server: String,
    /// Version string
    pub version: String,
    /// License flavour (`community` or `enterprise`)
    #[serde(default)]
    pub license: Option<String>,
}
