//! # Record Test Utilities
//!
//! Shared test utilities for the record service and gateway.
//!
//! This crate provides:
//! - `TestRecordServer` - a real tonic record service on a random port,
//!   backed by an in-memory store
//! - `TestGateway` - the real gateway router wired to a gRPC client
//!
//! ## Usage
//!
//! ```rust,ignore
//! use record_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let records = TestRecordServer::spawn().await?;
//!     let gateway = TestGateway::spawn(&records.url()).await?;
//!
//!     let response = reqwest::get(format!("{}/health", gateway.url())).await?;
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod server_harness;

// Re-export commonly used items
pub use server_harness::*;
