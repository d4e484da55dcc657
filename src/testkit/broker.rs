//! Scripted contextualization broker.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{ContextResource, ContextStatus};
use crate::error::BrokerError;
use crate::port::ContextBroker;

/// In-memory [`ContextBroker`] with a canned session handle and a queue of
/// status snapshots. When the queue runs dry, polls return an empty pending
/// snapshot.
pub struct ScriptedBroker {
    resource: ContextResource,
    statuses: Mutex<VecDeque<ContextStatus>>,
    polled_uris: Mutex<Vec<String>>,
    create_calls: AtomicU32,
    fail_create: AtomicBool,
    fail_status: AtomicBool,
}

impl ScriptedBroker {
    pub fn new(resource: ContextResource) -> Self {
        Self {
            resource,
            statuses: Mutex::new(VecDeque::new()),
            polled_uris: Mutex::new(Vec::new()),
            create_calls: AtomicU32::new(0),
            fail_create: AtomicBool::new(false),
            fail_status: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_statuses(self, statuses: Vec<ContextStatus>) -> Self {
        self.statuses.lock().unwrap().extend(statuses);
        self
    }

    /// Make `create_context` answer with a 500.
    #[must_use]
    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    /// Make `get_status` answer with a 500.
    #[must_use]
    pub fn failing_status(self) -> Self {
        self.fail_status.store(true, Ordering::SeqCst);
        self
    }

    pub fn create_calls(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// URIs polled so far, in order.
    pub fn polled_uris(&self) -> Vec<String> {
        self.polled_uris.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContextBroker for ScriptedBroker {
    async fn create_context(&self) -> Result<ContextResource, BrokerError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(BrokerError::UnexpectedStatus {
                action: "create",
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(self.resource.clone())
    }

    async fn get_status(&self, uri: &str) -> Result<ContextStatus, BrokerError> {
        self.polled_uris.lock().unwrap().push(uri.to_owned());
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(BrokerError::UnexpectedStatus {
                action: "status",
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ContextStatus {
                nodes: vec![],
                expected_count: 0,
                complete: false,
                error: false,
            }))
    }
}
