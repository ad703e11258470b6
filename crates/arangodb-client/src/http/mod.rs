//! HTTP transport layer
//!
//! This module owns the network side of the client: the [`Transport`] trait,
//! the reqwest-backed [`HttpTransport`], Basic authentication and the raw
//! [`Response`] handed to the command layer.

pub use auth::basic_auth_header;
pub use response::Response;
pub use transport::{HttpTransport, HttpTransportBuilder, Transport};

mod auth;
mod response;
mod transport;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, Method, StatusCode};
