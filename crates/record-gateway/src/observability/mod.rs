//! Observability for the record gateway.

pub mod metrics;
