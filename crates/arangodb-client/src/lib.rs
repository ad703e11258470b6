//! # arangodb-client
//!
//! Rust client for the ArangoDB HTTP API supporting:
//! - Named graph management
//! - Document get, insert and remove
//! - Basic authentication with a shared, lazily built connection pool
//! - A blocking facade for synchronous callers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arangodb_client::{Client, EdgeDefinition};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .url("http://localhost:8529")
//!         .database("social")
//!         .credential("root", "openSesame")
//!         .build()?;
//!
//!     let created = client
//!         .graphs()
//!         .create(
//!             "social",
//!             vec![EdgeDefinition::new("knows", ["persons"], ["persons"])],
//!             Vec::new(),
//!         )
//!         .await?;
//!
//!     println!("created {}", created.graph.name);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use command::{Command, CommandApi};
pub use config::{ClientConfig, ClientConfigBuilder, Credential};
pub use envelope::ResponseEnvelope;
pub use error::{Error, Result};
pub use naming::{CollectionNaming, CollectionRef, DefaultNaming};
pub use observability::{RequestLogger, TracingLogger};
pub use types::*;

#[cfg(feature = "blocking")]
pub use blocking::BlockingClient;

// Module declarations
pub mod client;
pub mod command;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod naming;
pub mod observability;
pub mod resources;
pub mod types;

#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use arangodb_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, CollectionRef, CommandApi, Error, Result,
        types::{
            CreateGraphResult, DocumentIdentifierResult, EdgeDefinition, EdgeDefinitionTyped,
            GraphIdentifierResult,
        },
    };
}

/// Crate version, sent in the `User-Agent` header
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
