//! Command dispatch
//!
//! A [`Command`] is one logical server operation: an API family, an HTTP
//! verb, an optional sub-path and query, and an optional JSON payload. It is
//! consumed by the request that sends it, so it can never be reused.
//!
//! # Example
//!
//! ```rust,no_run
//! use arangodb_client::{Client, CommandApi, http::Method};
//!
//! # async fn example(client: Client) -> arangodb_client::Result<()> {
//! let collections: serde_json::Value = client
//!     .command(CommandApi::Collection, Method::GET)
//!     .request_merged_result()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    client::Client,
    envelope::ResponseEnvelope,
    error::{Error, Result},
    http::Response,
};
use http::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

/// Server API families a command can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandApi {
    /// `_api/database`
    Database,
    /// `_api/collection`
    Collection,
    /// `_api/document`
    Document,
    /// `_api/gharial` (named graphs)
    Graph,
    /// `_api/index`
    Index,
    /// `_api/version`
    Version,
}

impl CommandApi {
    /// Path segment following `_api/`.
    pub fn segment(self) -> &'static str {
        match self {
            CommandApi::Database => "database",
            CommandApi::Collection => "collection",
            CommandApi::Document => "document",
            CommandApi::Graph => "gharial",
            CommandApi::Index => "index",
            CommandApi::Version => "version",
        }
    }
}

/// One logical database operation, translated into a single HTTP request.
#[derive(Debug)]
pub struct Command<'a> {
    client: &'a Client,
    api: CommandApi,
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    system: bool,
    body: Option<Vec<u8>>,
}

impl<'a> Command<'a> {
    pub(crate) fn new(client: &'a Client, api: CommandApi, method: Method) -> Self {
        Self {
            client,
            api,
            method,
            segments: Vec::new(),
            query: Vec::new(),
            system: false,
            body: None,
        }
    }

    /// Append a path segment after the API family (e.g. a graph name).
    ///
    /// The segment is percent-encoded, so names containing `/` stay one segment.
    pub fn command(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Address the server-wide API instead of the configured database.
    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }

    /// Attach a JSON payload.
    ///
    /// Commands without a payload send no body at all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `data` cannot be serialized.
    pub fn payload<B: Serialize + ?Sized>(mut self, data: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(data)?);
        Ok(self)
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Build the fully qualified request URL.
    ///
    /// `{base}/_db/{database}/_api/{family}[/{segments}][?query]`, without the
    /// `_db/{database}` prefix for system commands.
    pub fn url(&self) -> Result<Url> {
        let mut url = self.client.base_url().clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::InvalidUrl(format!(
                    "'{}' cannot be used as a base URL",
                    self.client.base_url()
                ))
            })?;
            path.pop_if_empty();
            if !self.system {
                path.push("_db").push(self.client.database());
            }
            path.push("_api").push(self.api.segment());
            path.extend(&self.segments);
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }

    /// Send the command and return the typed payload of the response.
    ///
    /// The envelope's `result` field is used when present, otherwise the
    /// whole response object.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] if the server answered 401
    /// - [`Error::Server`] if the envelope flags an error or the status is not 2xx
    /// - [`Error::Deserialization`] if the body does not have the expected shape
    /// - [`Error::Transport`] / [`Error::Timeout`] for network failures
    pub async fn request_merged_result<T: DeserializeOwned>(self) -> Result<T> {
        self.receive().await?.check()?.into_merged()
    }

    /// Send the command, confirm success and return only the `result` field.
    ///
    /// Intended for operations whose outcome is a single scalar or flag.
    /// Yields `None` when the server sends no `result`.
    ///
    /// # Errors
    ///
    /// Same as [`request_merged_result`](Self::request_merged_result).
    pub async fn request_generic_single_result<T: DeserializeOwned>(self) -> Result<Option<T>> {
        self.receive().await?.check()?.into_single()
    }

    /// Send the command and deserialize the whole response body.
    ///
    /// For endpoints that answer with a stored document. Only the HTTP status
    /// decides failure; `error` and `result` in a 2xx body are user fields.
    ///
    /// # Errors
    ///
    /// Same as [`request_merged_result`](Self::request_merged_result), except
    /// that an `"error": true` field on a 2xx response is not an error.
    pub async fn request_document<T: DeserializeOwned>(self) -> Result<T> {
        self.receive().await?.check_status()?.into_document()
    }

    async fn receive(self) -> Result<ResponseEnvelope> {
        let username = self.client.credential().username().to_string();
        let response = self.send().await?;

        // Custom transports may hand back a 401 instead of raising it.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication { username });
        }

        ResponseEnvelope::parse(&response)
    }

    async fn send(self) -> Result<Response> {
        let url = self.url()?;
        let client = self.client;
        client
            .transport()
            .send(self.method, url, self.body, client.credential())
            .await
    }
}
