//! Main client implementation for the ArangoDB HTTP API

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::{
    command::{Command, CommandApi},
    config::{ClientConfig, Credential},
    error::{Error, Result},
    http::{HttpTransport, Method, Transport},
    naming::{CollectionNaming, DefaultNaming},
    observability::RequestLogger,
    resources::{Documents, Graphs},
    types::ServerVersion,
};

/// Main client for talking to an ArangoDB server.
///
/// The client owns one [`Transport`] for its whole lifetime; clones share it.
/// With the default [`HttpTransport`] the underlying HTTP connection pool is
/// built on first use.
///
/// # Example
///
/// ```rust,no_run
/// use arangodb_client::Client;
///
/// # async fn example() -> arangodb_client::Result<()> {
/// let client = Client::builder()
///     .url("http://localhost:8529")
///     .database("social")
///     .credential("root", "openSesame")
///     .build()?;
///
/// let graph = client.graphs().info("social").await?;
/// println!("{} has {} edge definitions", graph.name, graph.edge_definitions.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    base_url: Url,
    database: String,
    credential: Credential,
    naming: Arc<dyn CollectionNaming>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("database", &self.inner.database)
            .field("credential", &self.inner.credential)
            .field("transport", &self.inner.transport)
            .field("naming", &self.inner.naming)
            .finish()
    }
}

impl Client {
    /// Create a client for `url` authenticating as `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn try_new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::builder()
            .url(url)
            .credential(username, password)
            .build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credential is configured
    /// - The URL is empty, unparsable or not http/https
    /// - The proxy URL or connection limit is invalid
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Start a command against this client's database.
    pub fn command(&self, api: CommandApi, method: Method) -> Command<'_> {
        Command::new(self, api, method)
    }

    /// Access the named-graph API.
    pub fn graphs(&self) -> Graphs<'_> {
        Graphs::new(self)
    }

    /// Access the document API.
    pub fn documents(&self) -> Documents<'_> {
        Documents::new(self)
    }

    /// Fetch the server version.
    ///
    /// Doubles as a connectivity and credential check.
    pub async fn version(&self) -> Result<ServerVersion> {
        self.command(CommandApi::Version, Method::GET)
            .system()
            .request_merged_result()
            .await
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The database commands are scoped to.
    pub fn database(&self) -> &str {
        &self.inner.database
    }

    /// The collection naming policy.
    pub fn naming(&self) -> &dyn CollectionNaming {
        self.inner.naming.as_ref()
    }

    pub(crate) fn credential(&self) -> &Credential {
        &self.inner.credential
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    naming: Option<Arc<dyn CollectionNaming>>,
    logger: Option<Arc<dyn RequestLogger>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Start from an existing configuration; later builder calls override it.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = self.config.merge(config);
        self
    }

    /// Set the server URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = Some(url.into());
        self
    }

    /// Set the database.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.config.database = Some(database.into());
        self
    }

    /// Set the credential used for Basic authentication.
    pub fn credential(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credential = Some(Credential::new(username, password));
        self
    }

    /// Route requests through an HTTP proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Set the ceiling on concurrent outbound connections.
    pub fn connection_limit(mut self, limit: usize) -> Self {
        self.config.connection_limit = Some(limit);
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the collection naming policy.
    pub fn naming(mut self, naming: Arc<dyn CollectionNaming>) -> Self {
        self.naming = Some(naming);
        self
    }

    /// Attach a request logger to the default transport.
    pub fn logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Use a custom transport instead of the default [`HttpTransport`].
    ///
    /// Proxy, connection limit, timeout and logger settings only apply to the
    /// default transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        let Self {
            config,
            naming,
            logger,
            transport,
        } = self;

        let credential = config.credential.clone().ok_or_else(|| {
            Error::MissingConfig(
                "No credential provided. Set ARANGO_USERNAME/ARANGO_PASSWORD or call credential()"
                    .to_string(),
            )
        })?;

        let base_url = parse_base_url(config.url_or_default())?;
        let database = config.database_or_default().to_string();
        if database.trim().is_empty() {
            return Err(Error::MissingConfig(
                "Database name cannot be empty".to_string(),
            ));
        }

        let transport = match transport {
            Some(transport) => transport,
            None => {
                let mut builder = HttpTransport::builder().config(&config);
                if let Some(logger) = logger {
                    builder = builder.logger(logger);
                }
                Arc::new(builder.build()?) as Arc<dyn Transport>
            }
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                database,
                credential,
                naming: naming.unwrap_or_else(|| Arc::new(DefaultNaming)),
            }),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let url: Url = raw
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("'{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidUrl(format!(
            "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
            scheme
        ))),
    }
}
