//! Broker wire types and their translation into the domain model.
//!
//! The broker speaks camelCase JSON; `okOccurred`, `errorOccurred`, and
//! `isComplete` may be absent and default to false, `errorCode` and
//! `errorMessage` to none. Everything else is required and a missing field
//! is a protocol failure, not a default.

use serde::Deserialize;

use crate::domain::{ContextNode, ContextNodeIdentity, ContextResource, ContextStatus};
use crate::error::BrokerError;

/// Body of a successful session-creation response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateContextBody {
    broker_uri: String,
    context_id: String,
    secret: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusBody {
    nodes: Vec<StatusNode>,
    #[serde(default)]
    is_complete: bool,
    #[serde(default)]
    error_occurred: bool,
    expected_node_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusNode {
    identities: Vec<StatusIdentity>,
    #[serde(default)]
    ok_occurred: bool,
    #[serde(default)]
    error_occurred: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusIdentity {
    iface: String,
    ip: String,
    hostname: String,
    pubkey: String,
}

/// Build a session handle from the create response's Location header and body.
pub(crate) fn resource_from_response(
    location: String,
    body: &str,
) -> Result<ContextResource, BrokerError> {
    let body: CreateContextBody =
        serde_json::from_str(body).map_err(|source| BrokerError::Decode {
            action: "create",
            source,
        })?;
    Ok(ContextResource::new(
        location,
        body.broker_uri,
        body.context_id,
        body.secret,
    ))
}

/// Translate a status response body into a fresh snapshot.
pub(crate) fn status_from_response(body: &str) -> Result<ContextStatus, BrokerError> {
    let body: StatusBody = serde_json::from_str(body).map_err(|source| BrokerError::Decode {
        action: "status",
        source,
    })?;

    let nodes = body
        .nodes
        .into_iter()
        .map(|node| ContextNode {
            identities: node
                .identities
                .into_iter()
                .map(|identity| ContextNodeIdentity {
                    interface: identity.iface,
                    ip: identity.ip,
                    hostname: identity.hostname,
                    pubkey: identity.pubkey,
                })
                .collect(),
            ok_occurred: node.ok_occurred,
            error_occurred: node.error_occurred,
            error_code: node.error_code,
            error_message: node.error_message,
        })
        .collect();

    Ok(ContextStatus {
        nodes,
        expected_count: body.expected_node_count,
        complete: body.is_complete,
        error: body.error_occurred,
    })
}
