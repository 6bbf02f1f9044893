//! sitewatch - live website-monitoring dashboard client
//!
//! This library keeps a client-side view of a monitoring server in sync: it
//! receives full snapshots over a WebSocket push channel, filters and renders
//! them, fetches aggregate statistics, and sends add/remove requests over the
//! server's REST API.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod history;
pub mod logging;
pub mod mutation;
pub mod push;
pub mod render;
pub mod snapshot;
pub mod stats;
