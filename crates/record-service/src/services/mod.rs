//! Service layer for the record service.
//!
//! - `record_service` - validation, token issuance/verification and record
//!   CRUD against a `RecordStore`

pub mod record_service;

pub use record_service::{RecordService, CREATED_MESSAGE, UPDATED_MESSAGE};
