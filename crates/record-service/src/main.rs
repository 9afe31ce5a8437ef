//! Record Service
//!
//! gRPC service owning user records.
//!
//! # Servers
//!
//! - gRPC server for the record API (default: 0.0.0.0:50051)
//! - HTTP server for health endpoints and metrics (default: 0.0.0.0:8081)
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment
//! 2. Initialize Prometheus metrics recorder
//! 3. Connect to PostgreSQL and run migrations
//! 4. Start health HTTP server
//! 5. Start gRPC server
//! 6. Wait for shutdown signal

use record_service::config::Config;
use record_service::grpc::RecordGrpcService;
use record_service::observability::metrics::init_metrics_recorder;
use record_service::repositories::PgRecordStore;
use record_service::routes::{build_health_routes, HealthState};
use record_service::services::RecordService;
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "record_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Record Service");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        grpc_bind_address = %config.grpc_bind_address,
        health_bind_address = %config.health_bind_address,
        db_max_connections = config.db_max_connections,
        "Configuration loaded successfully"
    );

    // Initialize Prometheus metrics recorder
    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!(error = %e, "Failed to initialize metrics recorder");
        e
    })?;

    // Initialize database connection pool with query timeout
    info!("Connecting to database...");
    let db_url_with_timeout = add_query_timeout(
        config.database_url.expose_secret(),
        config.db_query_timeout_seconds,
    );
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&db_url_with_timeout)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            e
        })?;

    info!("Database connection established");

    if config.run_migrations {
        sqlx::migrate!("../../migrations")
            .run(&db_pool)
            .await
            .map_err(|e| {
                error!("Failed to run migrations: {}", e);
                e
            })?;
        info!("Database migrations applied");
    }

    let service = RecordService::new(Arc::new(PgRecordStore::new(db_pool)));

    let shutdown_token = CancellationToken::new();

    // Start health HTTP server
    let health_addr: SocketAddr = config.health_bind_address.parse().map_err(|e| {
        error!(error = %e, addr = %config.health_bind_address, "Invalid health bind address");
        e
    })?;

    let health_app = build_health_routes(
        Arc::new(HealthState {
            service: service.clone(),
        }),
        Some(metrics_handle),
    );

    // Bind listener before spawning to fail fast on bind errors
    let listener = tokio::net::TcpListener::bind(health_addr)
        .await
        .map_err(|e| {
            error!(error = %e, addr = %health_addr, "Failed to bind health server");
            e
        })?;

    let health_shutdown_token = shutdown_token.child_token();
    let health_task = tokio::spawn(async move {
        info!(addr = %health_addr, "Health server starting");
        let server = axum::serve(listener, health_app).with_graceful_shutdown(async move {
            health_shutdown_token.cancelled().await;
            info!("Health server shutting down");
        });
        if let Err(e) = server.await {
            error!(error = %e, "Health server failed");
        }
    });

    // Start gRPC server
    let grpc_addr: SocketAddr = config.grpc_bind_address.parse().map_err(|e| {
        error!(error = %e, addr = %config.grpc_bind_address, "Invalid gRPC bind address");
        e
    })?;

    let grpc_shutdown_token = shutdown_token.child_token();
    let grpc_server = tonic::transport::Server::builder()
        .add_service(RecordGrpcService::new(service).into_server())
        .serve_with_shutdown(grpc_addr, async move {
            grpc_shutdown_token.cancelled().await;
            info!("gRPC server shutting down");
        });

    let grpc_task = tokio::spawn(async move {
        info!(addr = %grpc_addr, "gRPC server starting");
        if let Err(e) = grpc_server.await {
            error!(error = %e, "gRPC server failed");
        }
    });

    info!("Record Service running - press Ctrl+C to shutdown");
    shutdown_signal().await;

    // Propagates to the gRPC and health servers
    shutdown_token.cancel();

    if let Err(e) = grpc_task.await {
        error!(error = %e, "gRPC server task panicked");
    }
    if let Err(e) = health_task.await {
        error!(error = %e, "Health server task panicked");
    }

    info!("Record Service shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Adds statement_timeout to the database URL.
fn add_query_timeout(url: &str, timeout_secs: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}options=-c%20statement_timeout%3D{}s",
        url, separator, timeout_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_query_timeout_without_params() {
        assert_eq!(
            add_query_timeout("postgresql://localhost/records", 5),
            "postgresql://localhost/records?options=-c%20statement_timeout%3D5s"
        );
    }

    #[test]
    fn test_add_query_timeout_with_existing_params() {
        assert_eq!(
            add_query_timeout("postgresql://localhost/records?sslmode=disable", 2),
            "postgresql://localhost/records?sslmode=disable&options=-c%20statement_timeout%3D2s"
        );
    }
}
