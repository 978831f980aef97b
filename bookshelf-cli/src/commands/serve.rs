//! HTTP server command for the bookshelf API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use bookshelf_server::db::{create_pool_with_options, ensure_schema, pool::DEFAULT_MAX_CONNECTIONS};
use bookshelf_server::{run_server, BookStore, MemoryBookStore, PgBookStore, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BOOKSHELF_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum connections in the database pool
    #[arg(long, env = "BOOKSHELF_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Create the mst_book table if it does not exist
    #[arg(long)]
    pub init_schema: bool,

    /// Keep books in process memory instead of Postgres (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }

    fn database_url(&self) -> Result<&str> {
        self.database_url.as_deref().context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.bookshelf/.env",
        )
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    if args.in_memory {
        tracing::warn!("Using in-memory store; books are lost on shutdown");
        let store: Arc<dyn BookStore> = Arc::new(MemoryBookStore::new());
        return run_server(store, config).await.context("Server error");
    }

    let database_url = args.database_url()?;
    tracing::info!(max_connections = args.max_connections, "Connecting to database");

    let pool = create_pool_with_options(database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.init_schema {
        ensure_schema(&pool)
            .await
            .context("Failed to create mst_book table")?;
    }

    let store: Arc<dyn BookStore> = Arc::new(PgBookStore::new(pool.clone()));
    let result = run_server(store, config).await.context("Server error");

    pool.close().await;
    tracing::info!("Database pool closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--bind",
            "127.0.0.1:8080",
            "--database-url",
            "postgres://localhost/books",
            "--max-connections",
            "2",
            "--init-schema",
            "--cors-permissive",
        ])
        .unwrap();

        let config = args.server_config();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.cors_permissive);
        assert_eq!(args.database_url().unwrap(), "postgres://localhost/books");
        assert_eq!(args.max_connections, 2);
        assert!(args.init_schema);
        assert!(!args.in_memory);
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(ServeArgs::try_parse_from(["serve", "--bind", "not-an-addr"]).is_err());
    }
}
