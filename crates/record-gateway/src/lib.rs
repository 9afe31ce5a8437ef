//! Record Gateway Library
//!
//! REST front for the record service. Each HTTP request is translated into
//! one `records.v1.RecordService` RPC, and the RPC status is mapped back to
//! an HTTP status.
//!
//! # Modules
//!
//! - [`config`] - Gateway configuration from environment
//! - [`auth`] - Bearer token extraction
//! - [`handlers`] - `/record` handlers, health and metrics
//! - [`services`] - `RecordClient` trait and its tonic implementation
//! - [`errors`] - HTTP error envelope and RPC status mapping

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
