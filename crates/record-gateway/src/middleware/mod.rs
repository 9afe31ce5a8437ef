//! HTTP middleware for the record gateway.

pub mod http_metrics;
