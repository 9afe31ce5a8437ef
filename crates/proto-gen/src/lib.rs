//! Generated Protocol Buffer code for the records platform.
//!
//! This crate contains the compiled Protocol Buffer definitions used for
//! communication between the record gateway and the record service.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)] // Generated code has various doc formatting
#![allow(clippy::default_trait_access)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]

// Re-export prost traits for convenience
pub use prost::Message;

// Generated protobuf modules
#[allow(clippy::unwrap_used)] // tonic's generated fallback route unwraps a static response
pub mod records {
    //! Record service messages and gRPC stubs
    tonic::include_proto!("records.v1");
}
