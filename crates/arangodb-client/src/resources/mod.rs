//! API resource endpoints
//!
//! Each resource turns caller arguments into a [`Command`](crate::Command)
//! payload and dispatches it. Collection references are resolved through the
//! client's naming policy before they reach the payload.

pub mod documents;
pub mod graphs;

pub use documents::Documents;
pub use graphs::Graphs;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
