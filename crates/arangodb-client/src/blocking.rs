//! Blocking facade over the async client
//!
//! [`BlockingClient`] owns a small private tokio runtime. Each call spawns the
//! async operation onto that runtime and parks the calling thread on a
//! channel until it finishes. Because the work never runs on the caller's
//! executor, a blocking call made from inside another runtime (even a
//! current-thread one) cannot wait on itself.
//!
//! Errors come back as the same [`Error`] values the async API returns.
//!
//! # Example
//!
//! ```rust,no_run
//! use arangodb_client::{Client, blocking::BlockingClient};
//!
//! # fn example() -> arangodb_client::Result<()> {
//! let client = Client::try_new("http://localhost:8529", "root", "openSesame")?;
//! let blocking = BlockingClient::new(client)?;
//!
//! let graph = blocking.graphs().info("social")?;
//! println!("{}", graph.name);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::{Arc, mpsc};

use serde::{Serialize, de::DeserializeOwned};
use tokio::runtime::{Builder, Handle, Runtime};

use crate::{
    client::Client,
    error::{Error, Result},
    naming::CollectionRef,
    types::{
        CreateGraphResult, DocumentIdentifierResult, EdgeDefinition, EdgeDefinitionTyped,
        GraphIdentifierResult, ServerVersion,
    },
};

const BRIDGE_WORKER_THREADS: usize = 2;

/// Blocking wrapper around a [`Client`].
///
/// Cloning is cheap; clones share the client and the runtime.
#[derive(Debug, Clone)]
pub struct BlockingClient {
    client: Client,
    runtime: Arc<BridgeRuntime>,
}

#[derive(Debug)]
struct BridgeRuntime(Option<Runtime>);

impl BridgeRuntime {
    fn handle(&self) -> Option<&Handle> {
        self.0.as_ref().map(Runtime::handle)
    }
}

impl Drop for BridgeRuntime {
    fn drop(&mut self) {
        // shutdown_background never blocks, so this is safe inside async code
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

impl BlockingClient {
    /// Wrap a client, starting the private runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] if the runtime cannot be started.
    pub fn new(client: Client) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(BRIDGE_WORKER_THREADS)
            .thread_name("arangodb-client-blocking")
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(format!("failed to start blocking runtime: {}", e)))?;

        Ok(Self {
            client,
            runtime: Arc::new(BridgeRuntime(Some(runtime))),
        })
    }

    /// The wrapped async client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Run an async operation to completion, blocking the current thread.
    ///
    /// `op` receives a clone of the client. A panic inside the operation is
    /// resumed on the calling thread.
    pub fn block_on<F, Fut, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let handle = self
            .runtime
            .handle()
            .ok_or_else(|| Error::Runtime("blocking runtime has shut down".to_string()))?;

        let (tx, rx) = mpsc::sync_channel(1);
        let task = handle.spawn(op(self.client.clone()));
        handle.spawn(async move {
            let _ = tx.send(task.await);
        });

        match rx.recv() {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) if join_error.is_panic() => {
                std::panic::resume_unwind(join_error.into_panic())
            }
            Ok(Err(join_error)) => Err(Error::Runtime(join_error.to_string())),
            Err(_) => Err(Error::Runtime(
                "blocking runtime shut down before the operation completed".to_string(),
            )),
        }
    }

    /// Blocking named-graph API.
    pub fn graphs(&self) -> BlockingGraphs<'_> {
        BlockingGraphs { bridge: self }
    }

    /// Blocking document API.
    pub fn documents(&self) -> BlockingDocuments<'_> {
        BlockingDocuments { bridge: self }
    }

    /// Fetch the server version.
    pub fn version(&self) -> Result<ServerVersion> {
        self.block_on(|client| async move { client.version().await })
    }
}

/// Blocking counterpart of [`Graphs`](crate::resources::Graphs).
#[derive(Debug, Clone, Copy)]
pub struct BlockingGraphs<'a> {
    bridge: &'a BlockingClient,
}

impl BlockingGraphs<'_> {
    /// Create a graph.
    pub fn create(
        &self,
        name: &str,
        edge_definitions: Vec<EdgeDefinition>,
        orphan_collections: Vec<String>,
    ) -> Result<CreateGraphResult> {
        let name = name.to_string();
        self.bridge.block_on(move |client| async move {
            client
                .graphs()
                .create(&name, edge_definitions, orphan_collections)
                .await
        })
    }

    /// Create a graph from typed collection references.
    pub fn create_typed(
        &self,
        name: &str,
        edge_definitions: Vec<EdgeDefinitionTyped>,
        orphan_collections: Vec<CollectionRef>,
    ) -> Result<CreateGraphResult> {
        let name = name.to_string();
        self.bridge.block_on(move |client| async move {
            client
                .graphs()
                .create_typed(&name, edge_definitions, orphan_collections)
                .await
        })
    }

    /// Drop a graph.
    pub fn drop(&self, name: &str, drop_collections: bool) -> Result<()> {
        let name = name.to_string();
        self.bridge.block_on(move |client| async move {
            client.graphs().drop(&name, drop_collections).await
        })
    }

    /// Fetch a graph's definition.
    pub fn info(&self, name: &str) -> Result<GraphIdentifierResult> {
        let name = name.to_string();
        self.bridge
            .block_on(move |client| async move { client.graphs().info(&name).await })
    }
}

/// Blocking counterpart of [`Documents`](crate::resources::Documents).
#[derive(Debug, Clone, Copy)]
pub struct BlockingDocuments<'a> {
    bridge: &'a BlockingClient,
}

impl BlockingDocuments<'_> {
    /// Fetch a document by key.
    pub fn get<T>(&self, collection: impl Into<CollectionRef>, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let collection = collection.into();
        let key = key.to_string();
        self.bridge.block_on(move |client| async move {
            client.documents().get(collection, &key).await
        })
    }

    /// Insert a document and return its identity.
    pub fn insert<T>(
        &self,
        collection: impl Into<CollectionRef>,
        document: &T,
    ) -> Result<DocumentIdentifierResult>
    where
        T: Serialize + ?Sized,
    {
        let collection = collection.into();
        let document = serde_json::to_value(document)?;
        self.bridge.block_on(move |client| async move {
            client.documents().insert(collection, &document).await
        })
    }

    /// Remove a document by key.
    pub fn remove(
        &self,
        collection: impl Into<CollectionRef>,
        key: &str,
    ) -> Result<DocumentIdentifierResult> {
        let collection = collection.into();
        let key = key.to_string();
        self.bridge.block_on(move |client| async move {
            client.documents().remove(collection, &key).await
        })
    }
}
