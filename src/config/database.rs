//! Database configuration module.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::Product;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Default connection string: a local `SQLite` file, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/product_catalog.sqlite?mode=rwc";

/// File backing a `SQLite` URL, or `None` for in-memory and non-`SQLite` databases.
fn sqlite_file(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

/// Establishes a connection to the database at `database_url`.
///
/// For a file-backed `SQLite` database the parent directory is created first.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let parent = sqlite_file(database_url)
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        std::fs::create_dir_all(dir)?;
        debug!(dir = %dir.display(), "Ensured database directory exists.");
    }

    let db = Database::connect(database_url).await?;
    info!("Connected to database.");
    Ok(db)
}

/// Creates the `products` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    product_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;

    Ok(())
}
