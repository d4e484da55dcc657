//! Contextualization session types.
//!
//! A session is created once per cluster on the broker and thereafter only
//! observed by polling. [`ContextResource`] is the immutable handle returned
//! at creation; [`ContextStatus`] is a point-in-time snapshot rebuilt from
//! scratch on every poll, never cached.

use std::fmt;

/// Handle to a contextualization session created on the broker.
///
/// `uri` doubles as the cluster identifier and the polling endpoint. The
/// `secret` is handed to in-VM agents through userdata so they can report in;
/// it is redacted from `Debug` output and must never reach logs or error
/// messages.
#[derive(Clone, PartialEq, Eq)]
pub struct ContextResource {
    pub uri: String,
    pub broker_uri: String,
    pub context_id: String,
    pub secret: String,
}

impl ContextResource {
    pub fn new(
        uri: impl Into<String>,
        broker_uri: impl Into<String>,
        context_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            broker_uri: broker_uri.into(),
            context_id: context_id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for ContextResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextResource")
            .field("uri", &self.uri)
            .field("broker_uri", &self.broker_uri)
            .field("context_id", &self.context_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for ContextResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Point-in-time snapshot of a session, as last reported by the broker.
///
/// `complete` and `error` are broker-computed; the client reports them as-is
/// and does not validate transition legality between polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextStatus {
    /// One entry per VM that has reported in, in broker order.
    ///
    /// Correlation back to a node-spec group relies on identity content and
    /// ordering only; there is no stable key. If the broker reorders entries
    /// or two VMs share a hostname, correlation is ambiguous.
    pub nodes: Vec<ContextNode>,
    pub expected_count: usize,
    pub complete: bool,
    pub error: bool,
}

impl ContextStatus {
    /// Classify the snapshot into the session's observable state.
    #[must_use]
    pub fn state(&self) -> ContextState {
        if self.error {
            ContextState::Failed
        } else if self.complete {
            ContextState::Complete
        } else {
            ContextState::Pending
        }
    }
}

/// Observable session state, derived from a [`ContextStatus`] snapshot.
///
/// Sessions move pending → complete or pending → failed, but the broker is
/// the sole authority; nothing client-side enforces the transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Pending,
    Complete,
    Failed,
}

/// One VM's contextualization report, with one identity per network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextNode {
    pub identities: Vec<ContextNodeIdentity>,
    pub ok_occurred: bool,
    pub error_occurred: bool,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

/// A single network identity reported by a VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextNodeIdentity {
    pub interface: String,
    pub ip: String,
    pub hostname: String,
    pub pubkey: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secret() {
        let resource = ContextResource::new("u", "b", "c", "hunter2");
        let rendered = format!("{resource:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn display_is_the_session_uri() {
        let resource = ContextResource::new("https://broker/ctx/42", "b", "c", "s");
        assert_eq!(resource.to_string(), "https://broker/ctx/42");
    }

    #[test]
    fn state_classification() {
        let mut status = ContextStatus {
            nodes: vec![],
            expected_count: 1,
            complete: false,
            error: false,
        };
        assert_eq!(status.state(), ContextState::Pending);

        status.complete = true;
        assert_eq!(status.state(), ContextState::Complete);

        // error wins over complete; the broker sets both on a failed run
        status.error = true;
        assert_eq!(status.state(), ContextState::Failed);
    }
}
