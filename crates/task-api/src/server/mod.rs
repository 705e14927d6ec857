//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use task_common::{AppConfig, AppError, JwtService};
use task_db::{create_pool, run_migrations, PgTaskRepository, PgUserRepository};
use task_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged after the middleware so probes are never rate
/// limited.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(router.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// Uses PostgreSQL when `DATABASE_URL` is configured and the in-memory store
/// otherwise.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = JwtService::from_config(&config.jwt);

    let service_context = match &config.database {
        Some(db_config) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            if db_config.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!("Database schema is up to date");
            }

            ServiceContextBuilder::new()
                .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
                .task_repo(Arc::new(PgTaskRepository::new(pool.clone())))
                .pool(pool)
                .jwt_service(Arc::new(jwt_service))
                .build()
                .map_err(|e| AppError::Config(e.to_string()))?
        }
        None => {
            warn!("DATABASE_URL is not set; using the in-memory store (data is lost on restart)");
            ServiceContext::in_memory(jwt_service)
        }
    };

    if config.jwt.uses_development_secrets() {
        warn!("Using development token secrets; set ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET");
    }

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    } else {
        // No signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
}
