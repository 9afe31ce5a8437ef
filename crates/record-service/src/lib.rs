//! Record Service Library
//!
//! Owns user records: validation, bearer-token issuance and verification,
//! and persistence. The record API is served over gRPC
//! (`records.v1.RecordService`); a small HTTP listener exposes health
//! probes and Prometheus metrics.
//!
//! # Modules
//!
//! - [`config`] - Service configuration from environment
//! - [`errors`] - Domain errors and their gRPC status mapping
//! - [`services`] - Create/Get/Update business logic
//! - [`repositories`] - `RecordStore` trait with PostgreSQL and in-memory stores
//! - [`grpc`] - tonic service implementation
//! - [`crypto`] - Token generation and constant-time comparison

pub mod config;
pub mod crypto;
pub mod errors;
pub mod grpc;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
