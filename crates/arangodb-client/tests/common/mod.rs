//! Common test utilities and helpers

use std::path::Path;
use std::sync::{Arc, Mutex};

use arangodb_client::{
    Client, Credential, RequestLogger, Result,
    http::{HeaderMap, Method, Response, StatusCode, Transport},
};
use async_trait::async_trait;
use url::Url;

/// Username used by every test client
#[allow(dead_code)]
pub const TEST_USERNAME: &str = "root";

/// Password used by every test client
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "openSesame";

/// Expected Authorization header for the test credential
#[allow(dead_code)]
pub const TEST_AUTHORIZATION: &str = "Basic cm9vdDpvcGVuU2VzYW1l";

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Client pointed at a mock server, scoped to the `social` database
#[allow(dead_code)]
pub fn test_client(uri: &str) -> Client {
    Client::builder()
        .url(uri)
        .database("social")
        .credential(TEST_USERNAME, TEST_PASSWORD)
        .build()
        .expect("Failed to build client")
}

/// One request seen by [`MockTransport`]
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Vec<u8>>,
    pub username: String,
}

/// Transport that records requests and replays a canned response
#[allow(dead_code)]
#[derive(Debug)]
pub struct MockTransport {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        credential: &Credential,
    ) -> Result<Response> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(RecordedRequest {
                method,
                url,
                body,
                username: credential.username().to_string(),
            });

        Ok(Response::new(
            self.status,
            HeaderMap::new(),
            self.body.clone().into_bytes(),
        ))
    }
}

/// Request logger that keeps every line it receives
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct CapturingLogger {
    lines: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl CapturingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lock poisoned").clone()
    }
}

impl RequestLogger for CapturingLogger {
    fn is_enabled(&self) -> bool {
        true
    }

    fn log(&self, line: &str) {
        self.lines
            .lock()
            .expect("lock poisoned")
            .push(line.to_string());
    }
}
