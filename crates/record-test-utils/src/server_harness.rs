//! Test server harness for E2E testing
//!
//! Spawns the record service and gateway on random loopback ports. Both
//! servers stop when their harness value is dropped.

use metrics_exporter_prometheus::PrometheusBuilder;
use record_gateway::config::Config as GatewayConfig;
use record_gateway::routes::{build_routes, AppState};
use record_gateway::services::GrpcRecordClient;
use record_service::grpc::RecordGrpcService;
use record_service::repositories::{InMemoryRecordStore, RecordStore};
use record_service::services::RecordService;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;

/// Test harness for the record service gRPC server.
///
/// # Example
/// ```rust,ignore
/// let server = TestRecordServer::spawn().await?;
/// let channel = tonic::transport::Channel::from_shared(server.url())?
///     .connect()
///     .await?;
/// ```
pub struct TestRecordServer {
    addr: SocketAddr,
    store: Arc<InMemoryRecordStore>,
    cancel_token: CancellationToken,
    _handle: JoinHandle<()>,
}

impl TestRecordServer {
    /// Spawn a record service backed by a fresh in-memory store.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let store = Arc::new(InMemoryRecordStore::new());
        let (addr, cancel_token, handle) = serve_grpc(store.clone()).await?;

        Ok(Self {
            addr,
            store,
            cancel_token,
            _handle: handle,
        })
    }

    /// Get the in-memory store backing this server.
    pub fn store(&self) -> &InMemoryRecordStore {
        &self.store
    }

    /// Get the gRPC endpoint URL.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for TestRecordServer {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        self._handle.abort();
    }
}

/// Spawn a record service over an arbitrary store (e.g. a failing mock).
///
/// Returns the bound address and a guard that stops the server on drop.
pub async fn spawn_record_server_with_store(
    store: Arc<dyn RecordStore>,
) -> Result<(SocketAddr, ServerGuard), anyhow::Error> {
    let (addr, cancel_token, handle) = serve_grpc(store).await?;
    Ok((
        addr,
        ServerGuard {
            cancel_token,
            handle,
        },
    ))
}

/// Stops a spawned server when dropped.
pub struct ServerGuard {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        self.handle.abort();
    }
}

async fn serve_grpc(
    store: Arc<dyn RecordStore>,
) -> Result<(SocketAddr, CancellationToken, JoinHandle<()>), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind test gRPC server: {}", e))?;

    let addr = listener
        .local_addr()
        .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

    let cancel_token = CancellationToken::new();
    let server_token = cancel_token.clone();

    // Convert tokio listener to tonic-compatible incoming stream
    let incoming = TcpListenerStream::new(listener);
    let service = RecordGrpcService::new(RecordService::new(store));

    let handle = tokio::spawn(async move {
        let result = tonic::transport::Server::builder()
            .add_service(service.into_server())
            .serve_with_incoming_shutdown(incoming, async move {
                server_token.cancelled().await;
            })
            .await;
        if let Err(e) = result {
            eprintln!("Test gRPC server error: {}", e);
        }
    });

    Ok((addr, cancel_token, handle))
}

/// Test harness for the HTTP gateway.
///
/// Uses the gateway's real route builder and tonic client.
pub struct TestGateway {
    addr: SocketAddr,
    config: GatewayConfig,
    _handle: JoinHandle<()>,
}

impl TestGateway {
    /// Spawn a gateway that forwards to `record_service_url`.
    pub async fn spawn(record_service_url: &str) -> Result<Self, anyhow::Error> {
        let vars = HashMap::from([
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
            (
                "RECORD_SERVICE_URL".to_string(),
                record_service_url.to_string(),
            ),
            ("RECORD_SERVICE_TIMEOUT_SECONDS".to_string(), "5".to_string()),
            (
                "RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS".to_string(),
                "2".to_string(),
            ),
        ]);

        let config = GatewayConfig::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let client = GrpcRecordClient::new(&config)
            .map_err(|e| anyhow::anyhow!("Failed to create record client: {}", e))?;

        let state = Arc::new(AppState {
            client: Arc::new(client),
        });

        // Not installed globally; tests may spawn many gateways.
        let metrics_handle = PrometheusBuilder::new().build_recorder().handle();
        let app = build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test gateway: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test gateway error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Get the base URL of the gateway.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        // Explicitly abort the HTTP server task to ensure immediate cleanup
        self._handle.abort();
    }
}
