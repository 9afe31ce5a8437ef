//! Record service models.
//!
//! Contains the persisted `Record` and the caller-supplied `RecordInput`,
//! along with conversions to and from the generated protobuf types.

use crate::errors::RecordError;
use proto_gen::records as pb;
use std::fmt;

/// A persisted record.
///
/// `token` is the bearer credential assigned at creation. It is redacted in
/// Debug output.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Record {
    /// Caller-supplied identifier.
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Always > 0 for persisted records.
    pub age: i32,

    /// Opaque bearer credential, set once at creation.
    pub token: String,
}

/// Custom Debug implementation that redacts the token.
impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("age", &self.age)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Caller-supplied record fields for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInput {
    /// Used by create; ignored by update.
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    pub age: i32,
}

impl RecordInput {
    /// Validate the input.
    ///
    /// Both names must be non-empty and age must be strictly positive.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.age <= 0 {
            return Err(RecordError::InvalidRecord);
        }
        Ok(())
    }

    /// Build the record to persist, attaching the freshly issued token.
    pub fn into_record(self, token: String) -> Record {
        Record {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            token,
        }
    }

    /// Overwrite the mutable fields of `record`. `id` and `token` are kept.
    pub fn apply_to(self, record: &mut Record) {
        record.first_name = self.first_name;
        record.last_name = self.last_name;
        record.age = self.age;
    }
}

impl From<pb::Record> for RecordInput {
    fn from(record: pb::Record) -> Self {
        // Any token on an inbound payload is ignored: tokens are service-issued.
        RecordInput {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
        }
    }
}

impl From<Record> for pb::Record {
    fn from(record: Record) -> Self {
        pb::Record {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
            token: record.token,
        }
    }
}
