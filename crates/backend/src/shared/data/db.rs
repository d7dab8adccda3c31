//! Database bootstrap: sqlite connection, schema creation, and the single
//! soft-delete-decorated store handed to every call site.

use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

use super::soft_delete::SoftDeleteStore;
use super::sql_store::SqlStore;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();
static STORE: OnceCell<SoftDeleteStore<SqlStore>> = OnceCell::new();

const TABLES: [(&str, &str); 7] = [
    (
        "a001_holiday",
        r#"
        CREATE TABLE a001_holiday (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            price INTEGER NOT NULL,
            description TEXT NOT NULL,
            duration TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            deleted_at TEXT
        );
    "#,
    ),
    (
        "a002_sport",
        r#"
        CREATE TABLE a002_sport (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            price INTEGER NOT NULL,
            description TEXT NOT NULL,
            duration TEXT NOT NULL,
            city TEXT NOT NULL,
            location TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 1,
            sport_type_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            deleted_at TEXT
        );
    "#,
    ),
    (
        "a003_sport_type",
        r#"
        CREATE TABLE a003_sport_type (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            deleted_at TEXT
        );
    "#,
    ),
    (
        "c001_place",
        r#"
        CREATE TABLE c001_place (
            id TEXT PRIMARY KEY NOT NULL,
            holiday_id TEXT NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            deleted_at TEXT
        );
    "#,
    ),
    (
        "c002_benefit",
        r#"
        CREATE TABLE c002_benefit (
            id TEXT PRIMARY KEY NOT NULL,
            holiday_id TEXT NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            deleted_at TEXT
        );
    "#,
    ),
    (
        "c003_image",
        r#"
        CREATE TABLE c003_image (
            id TEXT PRIMARY KEY NOT NULL,
            holiday_id TEXT,
            sport_id TEXT,
            filename TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            deleted_at TEXT
        );
    "#,
    ),
    (
        "c004_itinerary",
        r#"
        CREATE TABLE c004_itinerary (
            id TEXT PRIMARY KEY NOT NULL,
            holiday_id TEXT,
            sport_id TEXT,
            day INTEGER NOT NULL,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            deleted_at TEXT
        );
    "#,
    ),
];

/// Create any missing tables (minimal schema bootstrap)
pub async fn create_tables(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, ddl) in TABLES {
        let existing = conn
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
                [table.into()],
            ))
            .await?;
        if existing.is_empty() {
            tracing::info!("Creating {} table", table);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                ddl.to_string(),
            ))
            .await?;
        }
    }
    Ok(())
}

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

    let conn = Database::connect(&db_url).await?;
    create_tables(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    STORE
        .set(SoftDeleteStore::new(SqlStore::new(get_connection())))
        .map_err(|_| anyhow::anyhow!("Failed to set STORE"))?;

    tracing::info!("Database initialized at {}", db_file);
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// The one decorated store every repository and service goes through
pub fn store() -> &'static SoftDeleteStore<SqlStore> {
    STORE.get().expect("Store has not been initialized")
}
