//! Document results

use serde::{Deserialize, Serialize};

/// Identity of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentIdentifierResult {
    /// Document id (`<collection>/<key>`)
    #[serde(rename = "_id")]
    pub id: String,
    /// Document key
    #[serde(rename = "_key")]
    pub key: String,
    /// Document revision
    #[serde(rename = "_rev")]
    pub rev: String,
}
