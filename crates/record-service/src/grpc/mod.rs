//! gRPC services for the record service.
//!
//! Exposes `records.v1.RecordService` and maps domain errors to gRPC
//! status codes.

pub mod records;

pub use records::RecordGrpcService;
