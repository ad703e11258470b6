//! Graph payloads and results

use crate::naming::{CollectionNaming, CollectionRef};
use serde::{Deserialize, Serialize};

/// Edge definition using resolved collection names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    /// Edge collection name
    pub collection: String,
    /// Vertex collections edges may start from
    #[serde(default)]
    pub from: Vec<String>,
    /// Vertex collections edges may point to
    #[serde(default)]
    pub to: Vec<String>,
}

impl EdgeDefinition {
    /// Create a new edge definition.
    pub fn new(
        collection: impl Into<String>,
        from: impl IntoIterator<Item = impl Into<String>>,
        to: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            collection: collection.into(),
            from: from.into_iter().map(Into::into).collect(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }
}

/// Edge definition whose collections still need to go through a naming policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDefinitionTyped {
    /// Edge collection
    pub collection: CollectionRef,
    /// Vertex collections edges may start from
    pub from: Vec<CollectionRef>,
    /// Vertex collections edges may point to
    pub to: Vec<CollectionRef>,
}

impl EdgeDefinitionTyped {
    /// Start an edge definition for the given edge collection.
    pub fn new(collection: impl Into<CollectionRef>) -> Self {
        Self {
            collection: collection.into(),
            from: Vec::new(),
            to: Vec::new(),
        }
    }

    /// Add a source vertex collection.
    pub fn from(mut self, collection: impl Into<CollectionRef>) -> Self {
        self.from.push(collection.into());
        self
    }

    /// Add a target vertex collection.
    pub fn to(mut self, collection: impl Into<CollectionRef>) -> Self {
        self.to.push(collection.into());
        self
    }

    /// Resolve every collection reference with `naming`.
    pub fn resolve(&self, naming: &dyn CollectionNaming) -> EdgeDefinition {
        EdgeDefinition {
            collection: naming.resolve_collection_name(&self.collection),
            from: self
                .from
                .iter()
                .map(|c| naming.resolve_collection_name(c))
                .collect(),
            to: self
                .to
                .iter()
                .map(|c| naming.resolve_collection_name(c))
                .collect(),
        }
    }
}

/// Body of a create-graph request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphCollectionData {
    /// Graph name
    pub name: String,
    /// Edge definitions
    pub edge_definitions: Vec<EdgeDefinition>,
    /// Vertex collections not used in any edge definition
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orphan_collections: Vec<String>,
}

/// Description of a graph as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphIdentifierResult {
    /// Graph name
    #[serde(default)]
    pub name: String,
    /// Document id (`_graphs/<name>`)
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Document key
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Document revision
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// Edge definitions
    #[serde(default)]
    pub edge_definitions: Vec<EdgeDefinition>,
    /// Orphan vertex collections
    #[serde(default)]
    pub orphan_collections: Vec<String>,
}

impl GraphIdentifierResult {
    /// Older servers only report `_key`; use it as the name when `name` is absent.
    pub(crate) fn with_name_from_key(mut self) -> Self {
        if self.name.is_empty()
            && let Some(key) = &self.key
        {
            self.name = key.clone();
        }
        self
    }
}

/// Result of creating (or fetching) a graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateGraphResult {
    /// The graph
    pub graph: GraphIdentifierResult,
}
