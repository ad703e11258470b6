//! Request payloads and typed results

pub mod document;
pub mod graph;
pub mod server;

pub use document::DocumentIdentifierResult;
pub use graph::{
    CreateGraphResult, EdgeDefinition, EdgeDefinitionTyped, GraphCollectionData,
    GraphIdentifierResult,
};
pub use server::ServerVersion;
