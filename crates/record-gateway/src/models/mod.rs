//! Record gateway models.
//!
//! JSON shapes of the HTTP API. They are independent of the protobuf types
//! and never carry the record token except in the create response.

use proto_gen::records as pb;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record fields as exchanged over HTTP.
///
/// Only a JSON object is accepted; arrays are rejected rather than matched
/// to fields by position. Missing fields default to zero values and the
/// record service rejects the result if that leaves it invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RecordBody {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RecordFields {
    id: i64,
    first_name: String,
    last_name: String,
    age: i32,
}

impl TryFrom<Map<String, Value>> for RecordBody {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: RecordFields = serde_json::from_value(Value::Object(object))?;
        Ok(RecordBody {
            id: fields.id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            age: fields.age,
        })
    }
}

impl From<RecordBody> for pb::Record {
    fn from(body: RecordBody) -> Self {
        pb::Record {
            id: body.id,
            first_name: body.first_name,
            last_name: body.last_name,
            age: body.age,
            token: String::new(),
        }
    }
}

impl From<pb::Record> for RecordBody {
    fn from(record: pb::Record) -> Self {
        RecordBody {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
        }
    }
}

/// Response body for `POST /record`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRecordResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordBody>,

    /// Bearer token for subsequent reads and updates.
    pub token: String,

    pub message: String,
}

/// Response body for `PUT /record/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRecordResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordBody>,

    pub message: String,
}
