//! Transport trait and the reqwest-backed implementation
//!
//! A [`Transport`] sends exactly one request and hands the raw response back.
//! It raises [`Error::Authentication`] on a 401 and otherwise returns every
//! status untouched; interpreting the body is the command layer's job.

use super::{Response, auth::basic_auth_header};
use crate::{
    config::{ClientConfig, Credential, DEFAULT_CONNECTION_LIMIT},
    error::{Error, Result},
    observability::{RequestLogger, RequestMetadata, RequestTimer, ResponseMetadata},
};
use async_trait::async_trait;
use http::{HeaderValue, Method, StatusCode, header};
use std::fmt;
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{OnceCell, Semaphore};
use url::Url;

/// Sends a single HTTP request on behalf of a command.
///
/// Implementations must:
/// - attach a Basic `Authorization` header computed from `credential`
/// - send `body` as `application/json` when present and no body otherwise
/// - fail with [`Error::Authentication`] on HTTP 401
/// - return every other response unchanged
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send one request and return the raw response.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        credential: &Credential,
    ) -> Result<Response>;
}

/// HTTP transport backed by a single, lazily built `reqwest::Client`.
///
/// The underlying client is created on the first request. Concurrent first
/// requests race on a `OnceCell`, so exactly one client is ever built per
/// transport. A semaphore caps in-flight requests at the connection limit;
/// requests beyond it wait for a slot instead of failing.
pub struct HttpTransport {
    client: OnceCell<reqwest::Client>,
    proxy: Option<reqwest::Proxy>,
    connection_limit: usize,
    timeout: Option<Duration>,
    permits: Semaphore,
    logger: Option<Arc<dyn RequestLogger>>,
    #[cfg(test)]
    builds: AtomicUsize,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("initialized", &self.client.initialized())
            .field("proxy", &self.proxy.is_some())
            .field("connection_limit", &self.connection_limit)
            .field("timeout", &self.timeout)
            .field("logger", &self.logger)
            .finish()
    }
}

impl HttpTransport {
    /// Create a new builder for configuring the transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Create a transport from the network settings of a client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Whether the underlying HTTP client has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    /// Ceiling on concurrent in-flight requests.
    pub fn connection_limit(&self) -> usize {
        self.connection_limit
    }

    async fn client(&self) -> Result<&reqwest::Client> {
        self.client
            .get_or_try_init(|| async { self.build_client() })
            .await
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        #[cfg(test)]
        self.builds.fetch_add(1, Ordering::SeqCst);

        let mut builder = reqwest::Client::builder()
            .user_agent(format!("arangodb-client-rust/{}", crate::VERSION))
            .tcp_nodelay(true)
            .pool_max_idle_per_host(self.connection_limit);

        builder = match &self.proxy {
            Some(proxy) => builder.proxy(proxy.clone()),
            None => builder.no_proxy(),
        };

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        tracing::debug!(
            connection_limit = self.connection_limit,
            proxy = self.proxy.is_some(),
            "Initialized HTTP transport"
        );

        Ok(client)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        credential: &Credential,
    ) -> Result<Response> {
        let mut metadata = RequestMetadata::new(method.as_str(), url.as_str());
        if let Some(body) = &body {
            metadata = metadata.with_body_size(body.len());
        }
        if let Some(logger) = &self.logger {
            metadata.write_trace(logger.as_ref(), body.as_deref());
        }
        metadata.log_request();

        let mut authorization = HeaderValue::from_str(&basic_auth_header(credential))
            .map_err(|e| Error::HttpClient(format!("Invalid authorization header: {}", e)))?;
        authorization.set_sensitive(true);

        let client = self.client().await?;
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let timer = RequestTimer::start();
        let mut request = client
            .request(method, url)
            .header(header::AUTHORIZATION, authorization);

        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            ResponseMetadata::new(status.as_u16(), timer.elapsed())
                .log_error(&metadata, "unauthorized");
            return Err(Error::Authentication {
                username: credential.username().to_string(),
            });
        }

        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout))?;

        ResponseMetadata::new(status.as_u16(), timer.elapsed())
            .with_body_size(bytes.len())
            .log_received(&metadata);

        Ok(Response::new(status, headers, bytes.to_vec()))
    }
}

/// Builder for creating an [`HttpTransport`].
pub struct HttpTransportBuilder {
    proxy: Option<String>,
    connection_limit: usize,
    timeout: Option<Duration>,
    logger: Option<Arc<dyn RequestLogger>>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            proxy: None,
            connection_limit: DEFAULT_CONNECTION_LIMIT,
            timeout: None,
            logger: None,
        }
    }
}

impl HttpTransportBuilder {
    /// Take proxy, connection limit and timeout from a client configuration.
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.proxy = config.proxy.clone();
        self.connection_limit = config.connection_limit_or_default();
        self.timeout = config.timeout;
        self
    }

    /// Route all requests through this proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the ceiling on concurrent in-flight requests.
    ///
    /// Defaults to 256.
    pub fn connection_limit(mut self, limit: usize) -> Self {
        self.connection_limit = limit;
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a request logger.
    pub fn logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Build the transport.
    ///
    /// The proxy URL and connection limit are validated here; the HTTP client
    /// itself is only built on the first request.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the connection limit is zero.
    pub fn build(self) -> Result<HttpTransport> {
        if self.connection_limit == 0 {
            return Err(Error::HttpClient(
                "Connection limit must be at least 1".to_string(),
            ));
        }

        let proxy = self
            .proxy
            .map(|url| {
                reqwest::Proxy::all(&url)
                    .map_err(|e| Error::InvalidUrl(format!("Invalid proxy '{}': {}", url, e)))
            })
            .transpose()?;

        Ok(HttpTransport {
            client: OnceCell::new(),
            proxy,
            connection_limit: self.connection_limit,
            timeout: self.timeout,
            permits: Semaphore::new(self.connection_limit),
            logger: self.logger,
            #[cfg(test)]
            builds: AtomicUsize::new(0),
        })
    }
}
