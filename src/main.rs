//! Macrolog
//!
//! An MCP server for food logging and nutrition tracking.

use std::path::PathBuf;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use macrolog::mcp::MacrologService;
use macrolog::{build_info, db};

/// Resolve the database path: env override, else data/macrolog.db next to
/// the project root (walking up out of target/{debug,release})
fn database_path() -> PathBuf {
    if let Ok(path) = std::env::var("MACROLOG_DATABASE_PATH") {
        return PathBuf::from(path);
    }

    let mut root = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if root.ends_with("release") || root.ends_with("debug") {
        if let Some(project) = root.parent().and_then(|p| p.parent()) {
            root = project.to_path_buf();
        }
    }

    root.join("data").join("macrolog.db")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; the MCP transport owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macrolog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = database_path();
    tracing::info!(path = %db_path.display(), "opening database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!(version, "database ready");
        Ok(())
    })?;

    tracing::info!("serving MCP on stdio");
    let service = MacrologService::new(database);
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
