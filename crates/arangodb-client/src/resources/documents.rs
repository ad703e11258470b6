//! Document API endpoint

use super::Resource;
use crate::{
    client::Client,
    command::CommandApi,
    error::{Error, Result},
    http::Method,
    naming::CollectionRef,
    types::DocumentIdentifierResult,
};
use serde::{Serialize, de::DeserializeOwned};

/// Document API resource (`_api/document`).
#[derive(Debug, Clone, Copy)]
pub struct Documents<'a> {
    client: &'a Client,
}

impl<'a> Documents<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch a document by key.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: impl Into<CollectionRef>,
        key: &str,
    ) -> Result<T> {
        validate_key(key)?;
        let collection = self.resolve(collection);

        self.client
            .command(CommandApi::Document, Method::GET)
            .command(collection)
            .command(key)
            .request_document()
            .await
    }

    /// Insert a document and return its identity.
    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        collection: impl Into<CollectionRef>,
        document: &T,
    ) -> Result<DocumentIdentifierResult> {
        let collection = self.resolve(collection);

        self.client
            .command(CommandApi::Document, Method::POST)
            .command(collection)
            .payload(document)?
            .request_document()
            .await
    }

    /// Remove a document by key and return the identity it had.
    pub async fn remove(
        &self,
        collection: impl Into<CollectionRef>,
        key: &str,
    ) -> Result<DocumentIdentifierResult> {
        validate_key(key)?;
        let collection = self.resolve(collection);

        self.client
            .command(CommandApi::Document, Method::DELETE)
            .command(collection)
            .command(key)
            .request_document()
            .await
    }

    fn resolve(&self, collection: impl Into<CollectionRef>) -> String {
        self.client
            .naming()
            .resolve_collection_name(&collection.into())
    }
}

impl Resource for Documents<'_> {
    fn client(&self) -> &Client {
        self.client
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidRequest(
            "Document key cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let client = Client::try_new("http://127.0.0.1:1", "root", "").unwrap();
        let result = client
            .documents()
            .get::<serde_json::Value>("persons", "")
            .await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));

        let result = client.documents().remove("persons", "").await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_resolve_uses_naming_policy() {
        #[allow(dead_code)]
        struct Person;

        let client = Client::try_new("http://localhost:8529", "root", "").unwrap();
        let documents = client.documents();
        assert_eq!(documents.resolve("persons"), "persons");
        assert_eq!(documents.resolve(CollectionRef::of::<Person>()), "Person");
    }
}
