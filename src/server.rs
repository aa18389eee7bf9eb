//! HTTP server initialization and runtime setup.
//!
//! Handles database and cache connections, state wiring, and the Axum
//! server lifecycle. Schema migrations are applied by an external migrator;
//! the server only verifies connectivity.

use crate::application::services::InventoryService;
use crate::config::Config;
use crate::infrastructure::cache::{ItemCache, NullCache, RedisCache};
use crate::infrastructure::persistence::PgItemRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Redis cache (or NullCache fallback)
/// - Inventory service and Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    let cache: Arc<dyn ItemCache> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let repository = Arc::new(PgItemRepository::new(Arc::new(pool)));
    let inventory = Arc::new(InventoryService::new(
        repository,
        cache,
        Duration::from_secs(config.cache_ttl_seconds),
    ));

    let state = AppState::new(
        inventory,
        config.jwt_secret.as_str(),
        Duration::from_secs(config.request_timeout_seconds),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
