//! Integration tests against a real contextualization broker.
//!
//! These tests require a reachable broker and real credentials, so they are
//! gated behind the `integration-tests` feature and marked `#[ignore]` to
//! prevent accidental execution.
//!
//! # Prerequisites
//!
//! ```bash
//! export MUSTER_BROKER_URI="https://broker.example/ctx"
//! export MUSTER_BROKER_KEY="operator"
//! export MUSTER_BROKER_SECRET="..."
//! ```
//!
//! # Running
//!
//! ```bash
//! cargo test --features integration-tests -- --ignored
//! ```
//!
//! Each run creates one real session on the broker; brokers usually expire
//! unused sessions on their own, but expect them to accumulate.

#![cfg(feature = "integration-tests")]

use muster::broker::HttpContextClient;
use muster::domain::ContextState;
use muster::port::ContextBroker;

fn client_from_env() -> Option<HttpContextClient> {
    let uri = std::env::var("MUSTER_BROKER_URI").ok()?;
    let key = std::env::var("MUSTER_BROKER_KEY").ok()?;
    let secret = std::env::var("MUSTER_BROKER_SECRET").ok()?;
    Some(HttpContextClient::new(uri, &key, &secret))
}

#[tokio::test]
#[ignore = "requires a real broker and MUSTER_BROKER_* environment variables"]
async fn create_and_poll_a_real_session() {
    let Some(client) = client_from_env() else {
        eprintln!("skipping: MUSTER_BROKER_* environment variables not set");
        return;
    };

    let resource = client.create_context().await.expect("session creation");
    assert!(!resource.uri.is_empty());
    assert!(!resource.secret.is_empty());

    // a fresh session with no VMs reporting in is pending, never complete
    let status = client.get_status(&resource.uri).await.expect("status poll");
    assert_eq!(status.state(), ContextState::Pending);
    assert!(status.nodes.is_empty());
}

#[tokio::test]
#[ignore = "requires a real broker and MUSTER_BROKER_* environment variables"]
async fn polling_a_nonexistent_session_is_a_broker_error() {
    let Some(client) = client_from_env() else {
        eprintln!("skipping: MUSTER_BROKER_* environment variables not set");
        return;
    };

    let bogus = format!("{}/does-not-exist", client.broker_uri());
    let err = client.get_status(&bogus).await;
    assert!(err.is_err(), "expected an error for a nonexistent session");
}
