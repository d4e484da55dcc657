//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provision`] — [`MockProvisioner`](provision::MockProvisioner) and
//!   [`MockNode`](provision::MockNode): scripted size catalogs, recorded
//!   creation calls, counted destroy/reboot.
//! - [`broker`] — [`ScriptedBroker`](broker::ScriptedBroker): canned session
//!   handles and status snapshots.
//! - [`domain`] — Builders for specs, identities, and snapshots, plus
//!   [`StaticDocument`](domain::StaticDocument).

pub mod broker;
pub mod domain;
pub mod provision;
