//! HTTP adapter for the contextualization broker.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{AUTHORIZATION, LOCATION};
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, info, warn};

use super::dto;
use crate::config::BrokerConfig;
use crate::domain::{ContextResource, ContextStatus};
use crate::error::BrokerError;
use crate::port::ContextBroker;

/// Authenticated HTTP client for a contextualization broker.
///
/// Credentials and base URI are fixed at construction and never mutated, so
/// one client can serve any number of sequential operations. No retry or
/// backoff here; only the transport-level timeouts configured on the
/// underlying client apply.
pub struct HttpContextClient {
    http: HttpClient,
    broker_uri: String,
    // The broker answers 401 without a WWW-Authenticate challenge, so
    // challenge-response negotiation never triggers. The Basic header is
    // computed once up front and sent on every request.
    auth_header: String,
}

impl HttpContextClient {
    #[must_use]
    pub fn new(broker_uri: impl Into<String>, key: &str, secret: &str) -> Self {
        Self {
            http: HttpClient::new(),
            broker_uri: broker_uri.into(),
            auth_header: basic_auth_header(key, secret),
        }
    }

    #[must_use]
    pub fn from_config(config: &BrokerConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            broker_uri: config.uri.clone(),
            auth_header: basic_auth_header(&config.key, &config.secret),
        }
    }

    /// Base URI that session-creation requests are POSTed to.
    pub fn broker_uri(&self) -> &str {
        &self.broker_uri
    }
}

fn basic_auth_header(key: &str, secret: &str) -> String {
    let credentials = general_purpose::STANDARD.encode(format!("{key}:{secret}"));
    format!("Basic {credentials}")
}

#[async_trait]
impl ContextBroker for HttpContextClient {
    async fn create_context(&self) -> Result<ContextResource, BrokerError> {
        info!(broker_uri = %self.broker_uri, "Creating contextualization session");

        let response = self
            .http
            .post(&self.broker_uri)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|source| BrokerError::Transport {
                action: "create",
                source,
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(BrokerError::UnexpectedStatus {
                action: "create",
                status,
            });
        }

        // The new session's URI arrives in the Location header; the body
        // carries what in-VM agents need to report in.
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or(BrokerError::MissingLocation)?;

        let body = response
            .text()
            .await
            .map_err(|source| BrokerError::Transport {
                action: "create",
                source,
            })?;

        let resource = dto::resource_from_response(location, &body)?;
        info!(uri = %resource.uri, context_id = %resource.context_id, "Session created");
        Ok(resource)
    }

    async fn get_status(&self, uri: &str) -> Result<ContextStatus, BrokerError> {
        let response = self
            .http
            .get(uri)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|source| BrokerError::Transport {
                action: "status",
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BrokerError::UnexpectedStatus {
                action: "status",
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| BrokerError::Transport {
                action: "status",
                source,
            })?;

        let snapshot = dto::status_from_response(&body)?;
        debug!(
            uri,
            reported = snapshot.nodes.len(),
            expected = snapshot.expected_count,
            complete = snapshot.complete,
            error = snapshot.error,
            "Polled session status"
        );
        Ok(snapshot)
    }
}
