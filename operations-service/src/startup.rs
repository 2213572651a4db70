//! Application startup and lifecycle management.

use crate::config::OperationsConfig;
use crate::jobs::{AccrualSettings, AccrualStore, LeaveAccrualJob};
use crate::routes::build_router;
use crate::services::{init_metrics, Database};
use axum::Router;
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::scheduler::spawn_scheduled;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: OperationsConfig,
    pub db: Arc<Database>,
    pub accrual: Arc<LeaveAccrualJob>,
}

impl AppState {
    /// Wire the accrual job to `db`. The job logs under its own span.
    pub fn new(config: OperationsConfig, db: Database) -> Self {
        let db = Arc::new(db);
        let store: Arc<dyn AccrualStore> = db.clone();
        let accrual = Arc::new(LeaveAccrualJob::new(
            store,
            AccrualSettings::from(&config.accrual),
            tracing::info_span!("leave_accrual", service = %config.service_name),
        ));

        Self {
            config,
            db,
            accrual,
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: OperationsConfig) -> Result<Self, AppError> {
        Self::build_internal(config, true).await
    }

    /// Build without running migrations, for tests whose harness already
    /// applied them.
    pub async fn build_without_migrations(config: OperationsConfig) -> Result<Self, AppError> {
        Self::build_internal(config, false).await
    }

    async fn build_internal(
        config: OperationsConfig,
        run_migrations: bool,
    ) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(
            config.database.url.expose_secret(),
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        if run_migrations {
            db.run_migrations().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to run migrations");
                e
            })?;
        }

        let addr: SocketAddr = format!("{}:{}", config.common.host, config.common.port)
            .parse()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid listen address: {}", e)))?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Operations service listener bound");

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, db),
            shutdown: CancellationToken::new(),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Cancelling this token stops the scheduler and drains the HTTP server.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Run the HTTP server and the accrual scheduler until the shutdown
    /// token is cancelled.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = self.router();
        let accrual_config = &self.state.config.accrual;

        let scheduler = if accrual_config.enabled {
            let job = self.state.accrual.clone();
            Some(spawn_scheduled(
                "leave_accrual",
                accrual_config.schedule.clone(),
                self.shutdown.clone(),
                move || {
                    let job = job.clone();
                    async move {
                        // Outcomes are logged by the job itself.
                        let _ = job.run_now("schedule").await;
                    }
                },
            ))
        } else {
            tracing::info!("Leave accrual scheduler disabled");
            None
        };

        tracing::info!(
            service = "operations-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        let shutdown = self.shutdown.clone();
        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;

        self.shutdown.cancel();
        if let Some(handle) = scheduler {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Scheduler task ended abnormally");
            }
        }

        result.inspect_err(|e| tracing::error!(error = %e, "HTTP server error"))
    }
}
