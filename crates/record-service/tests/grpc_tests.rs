//! RecordService gRPC integration tests.
//!
//! Exercises the tonic server over a real socket using `TestRecordServer`.

use proto_gen::records::record_service_client::RecordServiceClient;
use proto_gen::records::{CreateRecordRequest, GetRecordRequest, Record, UpdateRecordRequest};
use record_test_utils::TestRecordServer;
use tonic::transport::Channel;
use tonic::Code;

async fn connect(server: &TestRecordServer) -> Result<RecordServiceClient<Channel>, anyhow::Error> {
    Ok(RecordServiceClient::connect(server.url()).await?)
}

fn record(id: i64, first: &str, last: &str, age: i32) -> Record {
    Record {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        age,
        token: String::new(),
    }
}

#[tokio::test]
async fn test_create_get_update_over_grpc() -> Result<(), anyhow::Error> {
    let server = TestRecordServer::spawn().await?;
    let mut client = connect(&server).await?;

    let created = client
        .create_record(CreateRecordRequest {
            record: Some(record(1, "Cool", "Kid", 10)),
        })
        .await?
        .into_inner();

    assert_eq!(created.message, "Created user successfully");
    assert!(!created.token.is_empty());

    let fetched = client
        .get_record(GetRecordRequest {
            id: 1,
            token: created.token.clone(),
        })
        .await?
        .into_inner()
        .record
        .ok_or_else(|| anyhow::anyhow!("missing record"))?;

    assert_eq!(fetched.first_name, "Cool");
    assert_eq!(fetched.token, created.token);

    let updated = client
        .update_record(UpdateRecordRequest {
            id: 1,
            token: created.token.clone(),
            record: Some(record(42, "Cool", "Adult", 30)),
        })
        .await?
        .into_inner();

    assert_eq!(updated.message, "User successfully updated");
    let updated_record = updated
        .record
        .ok_or_else(|| anyhow::anyhow!("missing record"))?;
    assert_eq!(updated_record.id, 1);
    assert_eq!(updated_record.token, created.token);
    assert_eq!(updated_record.age, 30);

    Ok(())
}

#[tokio::test]
async fn test_status_codes_over_grpc() -> Result<(), anyhow::Error> {
    let server = TestRecordServer::spawn().await?;
    let mut client = connect(&server).await?;

    let invalid = client
        .create_record(CreateRecordRequest {
            record: Some(record(1, "User", "Name", 0)),
        })
        .await;
    assert!(matches!(invalid, Err(ref s) if s.code() == Code::InvalidArgument));

    let missing_payload = client
        .create_record(CreateRecordRequest { record: None })
        .await;
    assert!(matches!(missing_payload, Err(ref s) if s.code() == Code::InvalidArgument));

    let not_found = client
        .get_record(GetRecordRequest {
            id: 99,
            token: "anything".to_string(),
        })
        .await;
    assert!(
        matches!(not_found, Err(ref s) if s.code() == Code::Unknown && s.message() == "record not found")
    );

    client
        .create_record(CreateRecordRequest {
            record: Some(record(2, "Cool", "Kid", 10)),
        })
        .await?;

    let wrong_token = client
        .get_record(GetRecordRequest {
            id: 2,
            token: "wrong".to_string(),
        })
        .await;
    assert!(matches!(wrong_token, Err(ref s) if s.code() == Code::Unauthenticated));

    let duplicate = client
        .create_record(CreateRecordRequest {
            record: Some(record(2, "Other", "Kid", 11)),
        })
        .await;
    assert!(
        matches!(duplicate, Err(ref s) if s.code() == Code::Unknown && s.message() == "cannot create record successfully")
    );

    assert_eq!(server.store().len().await, 1);

    Ok(())
}
