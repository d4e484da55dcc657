//! Contextualization broker protocol client.
//!
//! Two operations, both authenticated with a precomputed Basic header:
//!
//! - `POST <broker-uri>` → 201 Created, session URI in `Location`, JSON body
//!   `{brokerUri, contextId, secret}`.
//! - `GET <session-uri>` → 200 OK, JSON body with per-node identities and
//!   aggregate completion flags.

mod client;
mod dto;

pub use client::HttpContextClient;
