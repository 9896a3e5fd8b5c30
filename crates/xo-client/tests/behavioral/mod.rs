//! Behavioral tests for the XO client.
//!
//! These run the public API end to end against a mocked REST gateway.

use prost::Message;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};
use xo_client::address::{xo_address, xo_prefix};
use xo_client::crypto::{Secp256k1PrivateKey, Signer};
use xo_client::payload::XoPayload;
use xo_client::transaction::{BatchList, TransactionHeader, XO_FAMILY_NAME};
use xo_client::{SubmitOutcome, Submission, XoClient, XoConfig};

fn connect(server: &MockServer) -> XoClient<xo_client::api::RestGateway, Secp256k1PrivateKey> {
    let config = XoConfig::new(&server.uri())
        .unwrap()
        .with_poll_interval(Duration::from_millis(20));
    XoClient::connect(config, Secp256k1PrivateKey::generate()).unwrap()
}

fn requested_id(request: &Request) -> String {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Answers PENDING `pending` times, then `status`.
fn status_after(
    pending: usize,
    status: &'static str,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    let calls = Arc::new(AtomicUsize::new(0));
    move |request: &Request| {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        let current = if call < pending { "PENDING" } else { status };
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": requested_id(request), "status": current }],
            "link": "http://localhost:8008/batch_status"
        }))
    }
}

async fn mount_batches(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "link": "http://localhost:8008/batch_status?id=x"
        })))
        .mount(server)
        .await;
}

async fn submitted_batch_list(server: &MockServer) -> BatchList {
    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.to_string() == "POST")
        .expect("no batch list submitted");
    BatchList::from_bytes(&post.body).unwrap()
}

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_wait_commits() {
        let server = MockServer::start().await;
        mount_batches(&server).await;
        Mock::given(method("GET"))
            .and(path("/batch_status"))
            .respond_with(status_after(2, "COMMITTED"))
            .expect(3)
            .mount(&server)
            .await;

        let client = connect(&server);
        let submission = client
            .create("game1", Some(Duration::from_secs(5)))
            .await
            .unwrap();

        let Submission::Completed(outcome) = submission else {
            panic!("expected a completed submission");
        };
        assert!(outcome.is_committed());
        assert!(outcome.to_string().starts_with("Game created in"));

        let batch_list = submitted_batch_list(&server).await;
        let batch = &batch_list.batches[0];
        let header = batch.decode_header().unwrap();
        assert_eq!(header.signer_pubkey, client.signer().public_key_hex());
        assert_eq!(header.transaction_ids, vec![batch.transactions[0].id().to_string()]);

        let txn = &batch.transactions[0];
        let txn_header = TransactionHeader::decode(txn.header.as_slice()).unwrap();
        assert_eq!(txn_header.family_name, XO_FAMILY_NAME);
        assert_eq!(txn_header.inputs, vec![xo_address("game1").to_string()]);
        assert_eq!(XoPayload::from_bytes(&txn.payload).unwrap(), XoPayload::create("game1"));
    }

    #[tokio::test]
    async fn test_invalid_batch_is_an_outcome() {
        let server = MockServer::start().await;
        mount_batches(&server).await;
        Mock::given(method("GET"))
            .and(path("/batch_status"))
            .respond_with(status_after(0, "INVALID"))
            .expect(1)
            .mount(&server)
            .await;

        let client = connect(&server);
        let submission = client
            .take("game1", 3, Some(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(submission, Submission::Completed(SubmitOutcome::Invalid));
    }

    #[tokio::test]
    async fn test_pending_batch_times_out() {
        let server = MockServer::start().await;
        mount_batches(&server).await;
        Mock::given(method("GET"))
            .and(path("/batch_status"))
            .respond_with(status_after(usize::MAX, "COMMITTED"))
            .mount(&server)
            .await;

        let client = connect(&server);
        let submission = client
            .create("game1", Some(Duration::from_millis(300)))
            .await
            .unwrap();
        assert!(matches!(
            submission,
            Submission::Completed(SubmitOutcome::TimedOut { waited }) if waited >= Duration::from_millis(300)
        ));
    }

    #[tokio::test]
    async fn test_slow_pending_polls_time_out_cleanly() {
        let server = MockServer::start().await;
        mount_batches(&server).await;
        Mock::given(method("GET"))
            .and(path("/batch_status"))
            .respond_with(|request: &Request| {
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "data": HashMap::from([(requested_id(request), "PENDING")])
                    }))
                    .set_delay(Duration::from_millis(1500))
            })
            .mount(&server)
            .await;

        // Each poll is held longer than the per-request timeout
        let config = XoConfig::new(&server.uri())
            .unwrap()
            .with_timeout(Duration::from_secs(1))
            .with_poll_interval(Duration::from_millis(20));
        let client = XoClient::connect(config, Secp256k1PrivateKey::generate()).unwrap();

        let submission = client.create("game1", Some(Duration::from_secs(3))).await;
        assert!(
            matches!(
                submission,
                Ok(Submission::Completed(SubmitOutcome::TimedOut { waited })) if waited >= Duration::from_secs(3)
            ),
            "{submission:?}"
        );
    }

    #[tokio::test]
    async fn test_submit_without_wait_returns_gateway_body() {
        let server = MockServer::start().await;
        mount_batches(&server).await;

        let client = connect(&server);
        let submission = client.create("game1", None).await.unwrap();
        let Submission::Submitted(body) = submission else {
            panic!("expected a plain submission");
        };
        assert!(body.contains("batch_status"));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_submission_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/batches"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = connect(&server);
        let err = client
            .create("game1", Some(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("500"));
    }
}

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_show_decodes_game() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/state/{}", xo_address("game1"))))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("data: Z2FtZTEsLS0tLS0tLS0tLFAxLU5FWFQsLA==\nhead: f00\n"),
            )
            .mount(&server)
            .await;

        let client = connect(&server);
        assert_eq!(
            client.show("game1").await.unwrap(),
            b"game1,---------,P1-NEXT,,"
        );
    }

    #[tokio::test]
    async fn test_show_missing_game_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/state/{}", xo_address("missing"))))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = connect(&server);
        assert_eq!(client.show("missing").await, None);
        assert_eq!(client.fetch_state("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_and_fetch_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/state"))
            .and(query_param("address", xo_prefix()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"address": xo_address("a").to_string(), "data": "YSwtLS0tLS0tLS0sUDEtTkVYVCws"},
                    {"address": xo_address("b").to_string(), "data": "YiwtLS0tLS0tLS0sUDEtTkVYVCws"}
                ],
                "head": "f00",
                "link": "http://localhost:8008/state?head=f00"
            })))
            .mount(&server)
            .await;

        let client = connect(&server);
        let games = client.list().await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0], b"a,---------,P1-NEXT,,");
        assert_eq!(client.fetch_all().await.unwrap(), games);
    }

    #[tokio::test]
    async fn test_server_error_split_between_read_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = connect(&server);
        assert_eq!(client.list().await, None);
        assert!(client.fetch_all().await.unwrap_err().is_transport());
        assert!(client.fetch_state("game1").await.is_err());
    }
}
