//! Tests for the in-memory cluster aggregate.

use std::sync::Arc;

use muster::domain::{Cluster, ClusterMember, ContextState};
use muster::testkit::broker::ScriptedBroker;
use muster::testkit::domain::{complete_status, identity, pending_status, reported_node, resource};
use muster::testkit::provision::MockNode;

fn member(uuid: &str, group: &str) -> ClusterMember {
    ClusterMember::new(Arc::new(MockNode::new(uuid)), group)
}

#[test]
fn uuid_derivation_is_deterministic() {
    let id = "http://broker.test/ctx/42";
    assert_eq!(Cluster::derive_uuid(id), Cluster::derive_uuid(id));
    assert_ne!(
        Cluster::derive_uuid(id),
        Cluster::derive_uuid("http://broker.test/ctx/43")
    );
}

#[tokio::test]
async fn cluster_uuid_matches_standalone_derivation() {
    let broker = Arc::new(ScriptedBroker::new(resource("http://broker.test/ctx/42")));
    let cluster = Cluster::new("http://broker.test/ctx/42", broker);
    assert_eq!(cluster.uuid(), Cluster::derive_uuid("http://broker.test/ctx/42"));
}

#[tokio::test]
async fn add_node_keys_by_uuid_and_last_write_wins() {
    let broker = Arc::new(ScriptedBroker::new(resource("http://broker.test/ctx/1")));
    let mut cluster = Cluster::new("http://broker.test/ctx/1", broker);

    cluster.add_node(member("node-a", "head"));
    cluster.add_node(member("node-b", "head"));
    cluster.add_node(member("node-a", "workers"));

    assert_eq!(cluster.len(), 2);
    let survivor = &cluster.nodes()["node-a"];
    assert_eq!(survivor.group(), "workers");
}

#[tokio::test]
async fn get_status_polls_the_session_uri_and_is_never_cached() {
    let broker = Arc::new(
        ScriptedBroker::new(resource("http://broker.test/ctx/9")).with_statuses(vec![
            pending_status(2),
            complete_status(vec![
                reported_node(vec![identity("eth0", "head-0")]),
                reported_node(vec![identity("eth0", "workers-0")]),
            ]),
        ]),
    );
    let cluster = Cluster::new(
        "http://broker.test/ctx/9",
        Arc::clone(&broker) as Arc<dyn muster::port::ContextBroker>,
    );

    let first = cluster.get_status().await.unwrap();
    assert_eq!(first.state(), ContextState::Pending);
    assert!(first.nodes.is_empty());

    let second = cluster.get_status().await.unwrap();
    assert_eq!(second.state(), ContextState::Complete);
    assert_eq!(second.nodes.len(), 2);

    assert_eq!(
        broker.polled_uris(),
        vec!["http://broker.test/ctx/9", "http://broker.test/ctx/9"]
    );
}

#[tokio::test]
async fn display_summarizes_identity_and_node_count() {
    let broker = Arc::new(ScriptedBroker::new(resource("http://broker.test/ctx/5")));
    let mut cluster = Cluster::new("http://broker.test/ctx/5", broker).with_name("analysis");
    cluster.add_nodes(vec![member("a", "head"), member("b", "head")]);

    let rendered = cluster.to_string();
    assert!(rendered.contains("name=analysis"));
    assert!(rendered.contains("total nodes=2"));
}
