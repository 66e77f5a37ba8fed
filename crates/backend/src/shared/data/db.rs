use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open (creating if needed) the SQLite file, bootstrap the schema and keep
/// the connection for `get_connection`.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}

/// Private in-memory database with the schema applied.
///
/// Pinned to one pooled connection: every SQLite `:memory:` connection is a
/// separate database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Create the record table and its indexes if they do not exist yet
pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let check_record_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='tracked_record';
    "#;
    let record_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_record_table.to_string(),
        ))
        .await?;

    if record_table_exists.is_empty() {
        tracing::info!("Creating tracked_record table");
        let create_record_table_sql = r#"
            CREATE TABLE tracked_record (
                id TEXT PRIMARY KEY NOT NULL,
                kind TEXT NOT NULL,
                tracking_id TEXT NOT NULL,
                status TEXT NOT NULL,
                document TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_record_table_sql.to_string(),
        ))
        .await?;
    }

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "CREATE INDEX IF NOT EXISTS idx_tracked_record_kind ON tracked_record (kind, created_at);"
            .to_string(),
    ))
    .await?;

    Ok(())
}
