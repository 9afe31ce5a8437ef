//! Service layer for the record gateway.
//!
//! - `record_client` - gRPC client for the record service

pub mod record_client;

pub use record_client::{GrpcRecordClient, RecordClient};
