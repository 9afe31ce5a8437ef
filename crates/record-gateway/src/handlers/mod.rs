//! HTTP request handlers for the record gateway.

pub mod health;
pub mod metrics;
pub mod records;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use records::{create_record, get_record, update_record};
