//! Named graph API endpoint

use super::Resource;
use crate::{
    client::Client,
    command::CommandApi,
    error::{Error, Result},
    http::Method,
    naming::CollectionRef,
    types::{
        CreateGraphResult, EdgeDefinition, EdgeDefinitionTyped, GraphCollectionData,
        GraphIdentifierResult,
    },
};

/// Named graph API resource (`_api/gharial`).
#[derive(Debug, Clone, Copy)]
pub struct Graphs<'a> {
    client: &'a Client,
}

impl<'a> Graphs<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a graph.
    ///
    /// `orphan_collections` lists vertex collections that take part in no
    /// edge definition; pass an empty vector for none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] with error number 1207 if a graph with that
    /// name already exists.
    pub async fn create(
        &self,
        name: &str,
        edge_definitions: Vec<EdgeDefinition>,
        orphan_collections: Vec<String>,
    ) -> Result<CreateGraphResult> {
        validate_name(name)?;

        let data = GraphCollectionData {
            name: name.to_string(),
            edge_definitions,
            orphan_collections,
        };

        let mut result: CreateGraphResult = self
            .client
            .command(CommandApi::Graph, Method::POST)
            .payload(&data)?
            .request_merged_result()
            .await?;

        result.graph = result.graph.with_name_from_key();
        Ok(result)
    }

    /// Create a graph from typed collection references.
    ///
    /// Every reference is resolved through the client's naming policy first.
    pub async fn create_typed(
        &self,
        name: &str,
        edge_definitions: Vec<EdgeDefinitionTyped>,
        orphan_collections: Vec<CollectionRef>,
    ) -> Result<CreateGraphResult> {
        let naming = self.client.naming();

        let edge_definitions = edge_definitions
            .iter()
            .map(|definition| definition.resolve(naming))
            .collect();
        let orphan_collections = orphan_collections
            .iter()
            .map(|collection| naming.resolve_collection_name(collection))
            .collect();

        self.create(name, edge_definitions, orphan_collections)
            .await
    }

    /// Drop a graph.
    ///
    /// With `drop_collections` the graph's collections are dropped too, unless
    /// another graph still uses them.
    pub async fn drop(&self, name: &str, drop_collections: bool) -> Result<()> {
        validate_name(name)?;

        self.client
            .command(CommandApi::Graph, Method::DELETE)
            .command(name)
            .query("dropCollections", drop_collections)
            .request_generic_single_result::<bool>()
            .await?;

        Ok(())
    }

    /// Fetch a graph's definition.
    pub async fn info(&self, name: &str) -> Result<GraphIdentifierResult> {
        validate_name(name)?;

        let result: CreateGraphResult = self
            .client
            .command(CommandApi::Graph, Method::GET)
            .command(name)
            .request_merged_result()
            .await?;

        Ok(result.graph.with_name_from_key())
    }
}

impl Resource for Graphs<'_> {
    fn client(&self) -> &Client {
        self.client
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "Graph name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
