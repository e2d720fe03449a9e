//! Contract tests for the fetch operation and its integrity gate.
//!
//! Wire shape: `POST /data/get` with `{ authToken, txId }`, answered with
//! `{ data, filename, integrity }` where `data` is hex-encoded.
use limelock::{Client, Error, Fingerprint};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client {
    Client::options()
        .base_url(server.uri())
        .token("test-token")
        .build()
        .unwrap()
}

#[tokio::test]
async fn get_data_sends_token_and_tx_id_and_decodes_the_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .and(body_json(json!({
            "authToken": "test-token",
            "txId": "tx-1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "68656c6c6f",
            "filename": "x.txt",
            "integrity": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let data = limelock::get::data(&client, "tx-1").await.unwrap();
    assert_eq!(data, b"hello");
}

#[tokio::test]
async fn get_data_refuses_a_compromised_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "68656c6c6f",
            "filename": "x.txt",
            "integrity": false,
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = limelock::get::data(&client, "tx-2").await.unwrap_err();
    assert!(matches!(err, Error::IntegrityViolation { tx_id } if tx_id == "tx-2"));
}

#[tokio::test]
async fn get_data_treats_a_missing_integrity_flag_as_compromised() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "68656c6c6f",
            "filename": "x.txt",
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = limelock::get::data(&client, "tx-3").await.unwrap_err();
    assert!(matches!(err, Error::IntegrityViolation { .. }));
}

#[tokio::test]
async fn get_data_checked_accepts_a_matching_fingerprint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "68656c6c6f",
            "filename": "x.txt",
            "integrity": true,
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let expected = Fingerprint::from_bytes(b"68656c6c6f");
    let data = limelock::get::data_checked(&client, "tx-4", &expected)
        .await
        .unwrap();
    assert_eq!(data, b"hello");
}

#[tokio::test]
async fn get_data_checked_rejects_a_mismatched_fingerprint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "68656c6c6f",
            "filename": "x.txt",
            "integrity": true,
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let wrong: Fingerprint = "900150983cd24fb0d6963f7d28e17f72".parse().unwrap();
    let err = limelock::get::data_checked(&client, "tx-5", &wrong)
        .await
        .unwrap_err();
    match err {
        Error::IntegrityCheckError { expected, actual } => {
            assert_eq!(expected, wrong);
            assert_eq!(actual, Fingerprint::from_bytes(b"68656c6c6f"));
        }
        other => panic!("expected IntegrityCheckError, got: {other:?}"),
    }
}

#[tokio::test]
async fn get_record_hands_back_the_raw_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "68656c6c6f",
            "filename": "x.txt",
            "integrity": false,
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = limelock::get::record(&client, "tx-6").await.unwrap();
    assert_eq!(record.data, "68656c6c6f");
    assert_eq!(record.filename.as_deref(), Some("x.txt"));
    assert!(!record.integrity);
}

#[tokio::test]
async fn get_surfaces_remote_rejection_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such transaction"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = limelock::get::data(&client, "tx-7").await.unwrap_err();
    match err {
        Error::RemoteRejection { status, body, .. } => {
            assert_eq!(status, 404);
            assert!(body.contains("no such transaction"));
        }
        other => panic!("expected RemoteRejection, got: {other:?}"),
    }
}

#[tokio::test]
async fn get_data_rejects_a_malformed_hex_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "not hex at all",
            "filename": "x.txt",
            "integrity": true,
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = limelock::get::data(&client, "tx-8").await.unwrap_err();
    assert!(matches!(err, Error::HexError(_)));
}
