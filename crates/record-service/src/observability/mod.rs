//! Observability for the record service.
//!
//! Provides metrics definitions and the Prometheus recorder setup.

pub mod metrics;
