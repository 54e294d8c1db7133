use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Creates the preference table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates a connection pool for the preference store and sets up the schema
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    log::debug!("Initializing preference store with URL: {database_url}");

    let db_path = extract_db_path_from_url(database_url)?;
    let db_file = std::path::Path::new(&db_path);

    // If database exists, check if it's readable/writable
    if db_file.exists() {
        std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(db_file)
            .map_err(|e| {
                log::error!("Database file permission error: {e}");
                color_eyre::eyre::eyre!("Database file permission error: {e}")
            })?;
    }

    let db_exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Error checking database: {e}"))?;

    if !db_exists {
        log::info!("Preference store does not exist, creating {db_path}");
        Sqlite::create_database(database_url).await.map_err(|e| {
            log::error!("Failed to create database: {e}");
            color_eyre::eyre::eyre!("Failed to create SQLite database: {e}")
        })?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| {
            log::error!("Failed to connect to database: {e}");
            color_eyre::eyre::eyre!("Failed to connect to SQLite database: {e}")
        })?;

    setup_database(&pool).await.map_err(|e| {
        log::error!("Failed to set up database schema: {e}");
        color_eyre::eyre::eyre!("Failed to set up database schema: {e}")
    })?;

    log::debug!("Preference store ready");
    Ok(pool)
}

/// Helper function to extract the database path from a SQLite URL
fn extract_db_path_from_url(url: &str) -> Result<String> {
    let Some(path_part) = url.strip_prefix("sqlite://") else {
        return Err(color_eyre::eyre::eyre!("Not a valid SQLite URL: {url}"));
    };

    // Unix-like absolute path: sqlite:///path
    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    // Relative path: sqlite://path
    Ok(path_part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_absolute_and_relative_paths() -> Result<()> {
        assert_eq!(
            extract_db_path_from_url("sqlite:///var/lib/dash.db")?,
            "/var/lib/dash.db"
        );
        assert_eq!(extract_db_path_from_url("sqlite://dash.db")?, "dash.db");
        assert!(extract_db_path_from_url("postgres://dash").is_err());
        Ok(())
    }
}
