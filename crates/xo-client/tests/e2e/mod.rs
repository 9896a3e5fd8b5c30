//! End-to-end tests against a running ledger node.
//!
//! These tests need a node whose REST gateway is reachable and which runs
//! the XO transaction processor. They are only compiled when the `e2e`
//! feature is enabled.
//!
//! ```bash
//! export XO_GATEWAY_URL=http://127.0.0.1:8008
//! cargo test -p xo-client --features e2e -- --ignored
//! ```

use rand::Rng;
use std::env;
use std::time::Duration;
use xo_client::api::RestGateway;
use xo_client::crypto::Secp256k1PrivateKey;
use xo_client::{SubmitOutcome, Submission, XoClient, XoConfig};

const WAIT: Duration = Duration::from_secs(10);

fn get_test_config() -> XoConfig {
    match env::var("XO_GATEWAY_URL") {
        Ok(url) => XoConfig::new(&url).unwrap(),
        Err(_) => XoConfig::local(),
    }
}

fn connect() -> XoClient<RestGateway, Secp256k1PrivateKey> {
    XoClient::connect(get_test_config(), Secp256k1PrivateKey::generate())
        .expect("failed to create client")
}

fn unique_game() -> String {
    format!("e2e{}", rand::thread_rng().gen::<u32>())
}

#[tokio::test]
#[ignore]
async fn e2e_create_and_show_game() {
    let client = connect();
    let name = unique_game();

    let submission = client.create(&name, Some(WAIT)).await.expect("create failed");
    println!("create: {submission:?}");
    assert!(matches!(
        submission,
        Submission::Completed(SubmitOutcome::Committed { .. })
    ));

    let game = client.show(&name).await.expect("game not found");
    let text = String::from_utf8_lossy(&game);
    println!("state: {text}");
    assert!(text.contains(&name));
}

#[tokio::test]
#[ignore]
async fn e2e_duplicate_game_is_invalid() {
    let client = connect();
    let name = unique_game();

    client.create(&name, Some(WAIT)).await.expect("create failed");
    let submission = client.create(&name, Some(WAIT)).await.expect("create failed");
    assert_eq!(submission, Submission::Completed(SubmitOutcome::Invalid));
}

#[tokio::test]
#[ignore]
async fn e2e_take_then_list() {
    let client = connect();
    let name = unique_game();

    client.create(&name, Some(WAIT)).await.expect("create failed");
    let submission = client.take(&name, 5, Some(WAIT)).await.expect("take failed");
    assert!(matches!(
        submission,
        Submission::Completed(SubmitOutcome::Committed { .. })
    ));

    let games = client.fetch_all().await.expect("list failed");
    assert!(games
        .iter()
        .any(|g| String::from_utf8_lossy(g).split(',').next() == Some(name.as_str())));
}
