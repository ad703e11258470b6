//! Integration tests for the document and version APIs using wiremock

mod common;

use arangodb_client::{CollectionRef, Error};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

#[tokio::test]
async fn test_insert_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_db/social/_api/document/persons"))
        .and(header("authorization", common::TEST_AUTHORIZATION))
        .and(body_json(json!({"name": "Alice", "age": 42})))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_string(common::load_response_fixture("document_created")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let alice = Person {
        name: "Alice".to_string(),
        age: 42,
    };
    let created = client
        .documents()
        .insert("persons", &alice)
        .await
        .expect("Request failed");

    assert_eq!(created.id, "persons/alice");
    assert_eq!(created.key, "alice");
    mock_server.verify().await;
}

#[tokio::test]
async fn test_insert_by_type_uses_naming_policy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_db/social/_api/document/Person"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_string(common::load_response_fixture("document_created")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let bob = Person {
        name: "Bob".to_string(),
        age: 7,
    };
    client
        .documents()
        .insert(CollectionRef::of::<Person>(), &bob)
        .await
        .expect("Request failed");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_get_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_db/social/_api/document/persons/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "persons/alice",
            "_key": "alice",
            "_rev": "_gF1Xm2e---",
            "name": "Alice",
            "age": 42
        })))
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let alice: Person = client
        .documents()
        .get("persons", "alice")
        .await
        .expect("Request failed");

    assert_eq!(
        alice,
        Person {
            name: "Alice".to_string(),
            age: 42
        }
    );
}

#[tokio::test]
async fn test_get_document_with_result_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_db/social/_api/document/jobs/j1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_key": "j1",
            "result": "ok",
            "name": "job"
        })))
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let job: Value = client
        .documents()
        .get("jobs", "j1")
        .await
        .expect("Request failed");

    assert_eq!(job, json!({"_key": "j1", "result": "ok", "name": "job"}));
}

#[tokio::test]
async fn test_get_document_with_error_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_db/social/_api/document/jobs/j2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_key": "j2",
            "error": true,
            "code": 7,
            "errorMessage": "disk full"
        })))
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let job: Value = client
        .documents()
        .get("jobs", "j2")
        .await
        .expect("a stored document with an error field is still a document");

    assert_eq!(job["error"], json!(true));
    assert_eq!(job["errorMessage"], "disk full");
}

#[tokio::test]
async fn test_get_missing_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_db/social/_api/document/persons/nobody"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": true,
            "code": 404,
            "errorNum": 1202,
            "errorMessage": "document not found"
        })))
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let err = client
        .documents()
        .get::<Person>("persons", "nobody")
        .await
        .expect_err("missing document should fail");

    assert!(err.is_not_found());
    assert_eq!(err.error_num(), Some(1202));
}

#[tokio::test]
async fn test_remove_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/_db/social/_api/document/persons/alice"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_string(common::load_response_fixture("document_created")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let removed = client
        .documents()
        .remove("persons", "alice")
        .await
        .expect("Request failed");

    assert_eq!(removed.rev, "_gF1Xm2e---");
    mock_server.verify().await;
}

#[tokio::test]
async fn test_version_skips_database_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/version"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("version")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let version = client.version().await.expect("Request failed");

    assert_eq!(version.server, "arango");
    assert_eq!(version.version, "3.11.5");
    assert_eq!(version.license.as_deref(), Some("community"));
}

#[tokio::test]
async fn test_server_error_without_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/version"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = common::test_client(&mock_server.uri());
    let result = client.version().await;

    assert!(matches!(
        result,
        Err(Error::Server {
            code: 503,
            error_num: 0,
            ..
        })
    ));
}
