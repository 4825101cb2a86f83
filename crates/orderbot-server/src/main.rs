//! orderbot-server — webhook fulfillment backend.
//!
//! Config (flags or env vars, see `ServerArgs`):
//!   ORDERBOT_BIND_ADDR          — listen address (default: 0.0.0.0:8000)
//!   ORDERBOT_DATABASE_URL       — Postgres connection string (optional)
//!   ORDERBOT_DB_MAX_CONNECTIONS — pool size (default: 5)

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use orderbot_core::drafts::MemoryDraftStore;
use orderbot_core::memory::MemoryOrderStore;
use orderbot_core::ports::OrderStore;
use orderbot_core::FulfillmentService;
use orderbot_server::config::ServerArgs;
use orderbot_server::router::build_router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orderbot_server=debug,tower_http=debug".into()),
        )
        .init();

    let args = ServerArgs::parse();
    let orders = build_order_store(&args).await?;
    let service = Arc::new(FulfillmentService::new(
        Arc::new(MemoryDraftStore::new()),
        orders,
    ));

    let app = build_router(service);

    let listener = TcpListener::bind(&args.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", args.bind_addr))?;
    tracing::info!("orderbot-server listening on {}", args.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_order_store(args: &ServerArgs) -> anyhow::Result<Arc<dyn OrderStore>> {
    use orderbot_core::postgres::PgOrderStore;
    use sqlx::postgres::PgPoolOptions;

    let Some(database_url) = args.database_url.as_deref() else {
        tracing::warn!("ORDERBOT_DATABASE_URL not set; orders are kept in memory");
        return Ok(Arc::new(MemoryOrderStore::with_default_menu()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Connected to database");

    let store = PgOrderStore::new(pool);
    store.migrate().await.context("failed to apply schema")?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
async fn build_order_store(args: &ServerArgs) -> anyhow::Result<Arc<dyn OrderStore>> {
    if args.database_url.is_some() {
        tracing::warn!("built without the `postgres` feature; ignoring ORDERBOT_DATABASE_URL");
    } else {
        tracing::warn!("ORDERBOT_DATABASE_URL not set; orders are kept in memory");
    }
    Ok(Arc::new(MemoryOrderStore::with_default_menu()))
}
