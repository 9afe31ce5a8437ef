//! HTTP handlers for the record service's health listener.

pub mod health;

pub use health::{health_check, readiness_check};
