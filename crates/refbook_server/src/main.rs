//! refbook_server binary.
//!
//! Reads config from env vars (a `.env` file is honored):
//!   DATABASE_URL      — Postgres connection string (default: postgresql://localhost:5432/refbooks)
//!   REFBOOK_BIND_ADDR — listen address (default: 0.0.0.0:8000)

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;

use refbook_core::service::RefbookService;
use refbook_postgres::{schema, PgRefbookStore};
use refbook_server::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,refbook_server=debug".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost:5432/refbooks".into());
    let bind_addr = std::env::var("REFBOOK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    info!("connected to database");

    schema::ensure_schema(&pool).await?;

    let service = Arc::new(RefbookService::new(Arc::new(PgRefbookStore::new(pool))));
    let app = build_router(service);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
