//! Structured logging for outbound requests
//!
//! Two layers live here. `tracing` events are always emitted for every
//! request and response. On top of that a caller may attach a
//! [`RequestLogger`], which receives a plain-text trace of each request
//! (timestamp, URL, method and serialized body) when it reports itself
//! enabled.

use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Caller-supplied sink for human-readable request traces.
pub trait RequestLogger: Send + Sync + fmt::Debug {
    /// Whether the logger wants request traces at all.
    fn is_enabled(&self) -> bool;

    /// Receive one line of trace output.
    fn log(&self, line: &str);
}

/// [`RequestLogger`] that forwards every line to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RequestLogger for TracingLogger {
    fn is_enabled(&self) -> bool {
        true
    }

    fn log(&self, line: &str) {
        info!(target: "arangodb_client::requests", "{}", line);
    }
}

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Full request URL
    pub url: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            url = %self.url,
            body_size = self.body_size,
            "Sending HTTP request"
        );
    }

    /// Write the plain-text trace of this request to an attached logger.
    ///
    /// Nothing is written unless the logger reports itself enabled.
    pub fn write_trace(&self, logger: &dyn RequestLogger, body: Option<&[u8]>) {
        if !logger.is_enabled() {
            return;
        }

        let data = body
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_else(|| "null".to_string());

        logger.log("==============================");
        logger.log(&chrono::Local::now().to_rfc3339());
        logger.log("sending http request:");
        logger.log(&format!("url: {}", self.url));
        logger.log(&format!("method: {}", self.method));
        logger.log(&format!("data: {}", data));
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log a received response
    pub fn log_received(&self, request: &RequestMetadata) {
        debug!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "HTTP response received"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            error = %error,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install a `tracing-subscriber` formatter driven by `RUST_LOG`.
///
/// Returns an error if a global subscriber is already installed.
#[cfg(feature = "trace")]
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
}
