//! gRPC service for record creation, lookup and update.
//!
//! Implements `RecordService` from records.proto on top of the domain
//! `services::RecordService`.
//!
//! # Security
//!
//! - Tokens are never logged or attached to spans
//! - Store error details are logged server-side only

use crate::errors::RecordError;
use crate::models::RecordInput;
use crate::observability::metrics;
use crate::services::{RecordService, CREATED_MESSAGE, UPDATED_MESSAGE};
use proto_gen::records::record_service_server::{
    RecordService as RecordServiceRpc, RecordServiceServer,
};
use proto_gen::records::{
    CreateRecordRequest, CreateRecordResponse, GetRecordRequest, GetRecordResponse,
    UpdateRecordRequest, UpdateRecordResponse,
};
use std::time::Instant;
use tonic::{Request, Response, Status};
use tracing::instrument;

/// gRPC front of the record service.
#[derive(Clone)]
pub struct RecordGrpcService {
    service: RecordService,
}

impl RecordGrpcService {
    /// Create a new gRPC service.
    pub fn new(service: RecordService) -> Self {
        Self { service }
    }

    /// Wrap into the tonic server type for `Server::add_service`.
    pub fn into_server(self) -> RecordServiceServer<Self> {
        RecordServiceServer::new(self)
    }
}

/// Record the outcome of an RPC and convert the domain error.
fn finish<T>(
    method: &'static str,
    start: Instant,
    result: Result<T, RecordError>,
) -> Result<Response<T>, Status> {
    match result {
        Ok(value) => {
            metrics::record_grpc_request(method, "success", start.elapsed());
            Ok(Response::new(value))
        }
        Err(e) => {
            metrics::record_grpc_request(method, e.kind(), start.elapsed());
            tracing::debug!(target: "rs.grpc.records", method, error = %e, "RPC failed");
            Err(e.into())
        }
    }
}

#[tonic::async_trait]
impl RecordServiceRpc for RecordGrpcService {
    /// Create a record.
    ///
    /// A missing `record` payload is an invalid argument.
    #[instrument(skip_all, name = "rs.grpc.create_record")]
    async fn create_record(
        &self,
        request: Request<CreateRecordRequest>,
    ) -> Result<Response<CreateRecordResponse>, Status> {
        let start = Instant::now();
        let req = request.into_inner();

        let result: Result<CreateRecordResponse, RecordError> = async move {
            let input = RecordInput::from(req.record.ok_or(RecordError::InvalidRecord)?);
            let record = self.service.create(input).await?;
            let token = record.token.clone();

            Ok(CreateRecordResponse {
                record: Some(record.into()),
                token,
                message: CREATED_MESSAGE.to_string(),
            })
        }
        .await;

        finish("create_record", start, result)
    }

    /// Fetch a record by id, authorized by its token.
    #[instrument(skip_all, name = "rs.grpc.get_record", fields(record_id = request.get_ref().id))]
    async fn get_record(
        &self,
        request: Request<GetRecordRequest>,
    ) -> Result<Response<GetRecordResponse>, Status> {
        let start = Instant::now();
        let req = request.into_inner();

        let result = self
            .service
            .get(req.id, &req.token)
            .await
            .map(|record| GetRecordResponse {
                record: Some(record.into()),
            });

        finish("get_record", start, result)
    }

    /// Update a record's names and age, authorized by its token.
    #[instrument(skip_all, name = "rs.grpc.update_record", fields(record_id = request.get_ref().id))]
    async fn update_record(
        &self,
        request: Request<UpdateRecordRequest>,
    ) -> Result<Response<UpdateRecordResponse>, Status> {
        let start = Instant::now();
        let req = request.into_inner();

        let result: Result<UpdateRecordResponse, RecordError> = async move {
            let input = RecordInput::from(req.record.ok_or(RecordError::InvalidRecord)?);
            let record = self.service.update(req.id, &req.token, input).await?;

            Ok(UpdateRecordResponse {
                record: Some(record.into()),
                message: UPDATED_MESSAGE.to_string(),
            })
        }
        .await;

        finish("update_record", start, result)
    }
}
