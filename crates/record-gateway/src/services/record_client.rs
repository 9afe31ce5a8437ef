//! Record Service gRPC Client.
//!
//! The gateway reaches the record service through the `RecordClient` trait
//! so handlers can be exercised against a mock.
//!
//! # Security
//!
//! - Bearer tokens are forwarded verbatim and never logged
//! - Deadlines prevent hanging requests

use crate::config::Config;
use crate::observability::metrics;
use proto_gen::records::record_service_client::RecordServiceClient;
use proto_gen::records::{
    CreateRecordRequest, CreateRecordResponse, GetRecordRequest, GetRecordResponse, Record,
    UpdateRecordRequest, UpdateRecordResponse,
};
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;
use tracing::{instrument, warn};

/// Record service operations used by the HTTP handlers.
///
/// Errors are the raw RPC status; mapping to HTTP happens in the handlers.
#[async_trait::async_trait]
pub trait RecordClient: Send + Sync {
    /// Create a record. `record.token` is ignored by the service.
    async fn create_record(&self, record: Record) -> Result<CreateRecordResponse, Status>;

    /// Fetch a record, presenting its bearer token.
    async fn get_record(&self, id: i64, token: &str) -> Result<GetRecordResponse, Status>;

    /// Replace a record's name and age, presenting its bearer token.
    async fn update_record(
        &self,
        id: i64,
        token: &str,
        record: Record,
    ) -> Result<UpdateRecordResponse, Status>;
}

/// tonic-backed record client.
///
/// Holds one multiplexed channel; clones of the generated client share it.
#[derive(Clone)]
pub struct GrpcRecordClient {
    client: RecordServiceClient<Channel>,
}

impl GrpcRecordClient {
    /// Build a client from configuration.
    ///
    /// The channel connects lazily, so the gateway can start before the
    /// record service is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if `record_service_url` is not a valid endpoint.
    pub fn new(config: &Config) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(config.record_service_url.clone())?
            .connect_timeout(Duration::from_secs(
                config.record_service_connect_timeout_seconds,
            ))
            .timeout(Duration::from_secs(config.record_service_timeout_seconds))
            .connect_lazy();

        Ok(Self::from_channel(channel))
    }

    /// Build a client over an existing channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: RecordServiceClient::new(channel),
        }
    }
}

/// Record the RPC outcome and unwrap the response.
fn observe<T>(
    method: &'static str,
    result: Result<tonic::Response<T>, Status>,
) -> Result<T, Status> {
    match result {
        Ok(response) => {
            metrics::record_rpc_call(method, None);
            Ok(response.into_inner())
        }
        Err(status) => {
            metrics::record_rpc_call(method, Some(status.code()));
            warn!(
                target: "gw.services.record_client",
                method,
                code = ?status.code(),
                message = %status.message(),
                "Record service RPC failed"
            );
            Err(status)
        }
    }
}

#[async_trait::async_trait]
impl RecordClient for GrpcRecordClient {
    #[instrument(skip_all, name = "gw.rpc.create_record", fields(record_id = record.id))]
    async fn create_record(&self, record: Record) -> Result<CreateRecordResponse, Status> {
        let mut client = self.client.clone();
        let result = client
            .create_record(CreateRecordRequest {
                record: Some(record),
            })
            .await;
        observe("create_record", result)
    }

    #[instrument(skip_all, name = "gw.rpc.get_record", fields(record_id = id))]
    async fn get_record(&self, id: i64, token: &str) -> Result<GetRecordResponse, Status> {
        let mut client = self.client.clone();
        let result = client
            .get_record(GetRecordRequest {
                id,
                token: token.to_string(),
            })
            .await;
        observe("get_record", result)
    }

    #[instrument(skip_all, name = "gw.rpc.update_record", fields(record_id = id))]
    async fn update_record(
        &self,
        id: i64,
        token: &str,
        record: Record,
    ) -> Result<UpdateRecordResponse, Status> {
        let mut client = self.client.clone();
        let result = client
            .update_record(UpdateRecordRequest {
                id,
                token: token.to_string(),
                record: Some(record),
            })
            .await;
        observe("update_record", result)
    }
}

/// Mock record client module for testing.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tonic::Code;

    /// Token issued by the mock on create.
    pub const MOCK_TOKEN: &str = "mock-token";

    /// Mock record client for handler tests.
    pub struct MockRecordClient {
        /// Record returned by `get_record`.
        stored: Option<Record>,
        /// Status every call fails with, if set.
        failure: Option<(Code, String)>,
        /// Number of calls made.
        call_count: AtomicUsize,
        /// Token presented on the most recent get/update.
        last_token: Mutex<Option<String>>,
    }

    impl MockRecordClient {
        /// Create a mock that succeeds and serves `stored` from `get_record`.
        pub fn succeeding(stored: Record) -> Self {
            Self {
                stored: Some(stored),
                failure: None,
                call_count: AtomicUsize::new(0),
                last_token: Mutex::new(None),
            }
        }

        /// Create a mock whose every call fails with `code`.
        pub fn failing(code: Code, message: &str) -> Self {
            Self {
                stored: None,
                failure: Some((code, message.to_string())),
                call_count: AtomicUsize::new(0),
                last_token: Mutex::new(None),
            }
        }

        /// Get the number of calls made.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Token presented on the most recent get/update.
        pub fn last_token(&self) -> Option<String> {
            self.last_token.lock().ok().and_then(|guard| guard.clone())
        }

        fn begin(&self, token: Option<&str>) -> Result<(), Status> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let (Some(token), Ok(mut guard)) = (token, self.last_token.lock()) {
                *guard = Some(token.to_string());
            }
            match &self.failure {
                Some((code, message)) => Err(Status::new(*code, message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl RecordClient for MockRecordClient {
        async fn create_record(&self, record: Record) -> Result<CreateRecordResponse, Status> {
            self.begin(None)?;
            Ok(CreateRecordResponse {
                record: Some(Record {
                    token: MOCK_TOKEN.to_string(),
                    ..record
                }),
                token: MOCK_TOKEN.to_string(),
                message: "Created user successfully".to_string(),
            })
        }

        async fn get_record(&self, _id: i64, token: &str) -> Result<GetRecordResponse, Status> {
            self.begin(Some(token))?;
            Ok(GetRecordResponse {
                record: self.stored.clone(),
            })
        }

        async fn update_record(
            &self,
            id: i64,
            token: &str,
            record: Record,
        ) -> Result<UpdateRecordResponse, Status> {
            self.begin(Some(token))?;
            Ok(UpdateRecordResponse {
                record: Some(Record {
                    id,
                    token: token.to_string(),
                    ..record
                }),
                message: "User successfully updated".to_string(),
            })
        }
    }

    #[cfg(test)]
    #[allow(clippy::unwrap_used, clippy::expect_used)]
    mod tests {
        use super::*;

        fn sample() -> Record {
            Record {
                id: 1,
                first_name: "Cool".to_string(),
                last_name: "Kid".to_string(),
                age: 10,
                token: "valid_token".to_string(),
            }
        }

        #[tokio::test]
        async fn test_mock_succeeding_tracks_calls_and_token() {
            let mock = MockRecordClient::succeeding(sample());

            let response = mock.get_record(1, "valid_token").await.unwrap();
            assert_eq!(response.record.unwrap().first_name, "Cool");
            assert_eq!(mock.call_count(), 1);
            assert_eq!(mock.last_token().as_deref(), Some("valid_token"));
        }

        #[tokio::test]
        async fn test_mock_failing() {
            let mock = MockRecordClient::failing(Code::Unauthenticated, "Unauthenticated");

            let status = mock.get_record(1, "wrong").await.unwrap_err();
            assert_eq!(status.code(), Code::Unauthenticated);
            assert_eq!(mock.call_count(), 1);
        }
    }
}
