//! Muster - cluster provisioning with broker-backed contextualization.
//!
//! This crate turns a declarative cluster description into a group of cloud
//! compute instances wired together through a remote contextualization
//! broker: a service that lets freshly booted VMs discover each other's
//! network identities (IP, hostname, public key) before any application-level
//! coordination exists.
//!
//! # Architecture
//!
//! The driver is written against capability traits, with concrete backends
//! injected at construction:
//!
//! - **[`port`]** - Seams: [`port::ContextBroker`],
//!   [`port::ProvisioningDriver`], [`port::ClusterDocument`]
//! - **[`broker`]** - HTTP/JSON broker client with precomputed Basic auth
//! - **[`driver`]** - [`driver::ClusterDriver`] orchestration: one broker
//!   session plus sequential per-group provisioning, no rollback
//! - **[`domain`]** - Session handles, status snapshots, node specs, and the
//!   in-memory [`domain::Cluster`] aggregate
//!
//! Creation is a coordination of two independent fallible systems with no
//! native atomicity: every failure propagates to the caller and partially
//! created state is left exactly as it was. Contextualization progress is
//! observed only by polling [`domain::Cluster::get_status`].
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Backend-agnostic types
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for injected capabilities
//! - [`broker`] - Broker protocol client
//! - [`driver`] - Cluster orchestration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use muster::broker::HttpContextClient;
//! use muster::driver::ClusterDriver;
//!
//! let client = HttpContextClient::new("https://broker.example/ctx", "key", "secret");
//! # let provisioner: Arc<dyn muster::port::ProvisioningDriver> = unimplemented!();
//! let driver = ClusterDriver::new(Arc::new(client), provisioner);
//! ```

pub mod broker;
pub mod config;
pub mod domain;
pub mod driver;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
