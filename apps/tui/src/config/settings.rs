use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_DATABASE_NAME: &str = "traffic_dashboard.db";
const DEFAULT_LOG_FILE: &str = "traffic_dashboard.log";

/// Settings resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub database_url: String,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Initializes the application configuration
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()?;

    let api_url = env::var("PREDICTION_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());
    let database_path = base_dir.join(&db_name);

    // Create parent directory if it doesn't exist
    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let log_file = env::var("LOG_FILE").map_or_else(
        |_| base_dir.join(DEFAULT_LOG_FILE),
        |path| base_dir.join(path),
    );

    Ok(AppConfig {
        api_url,
        database_url: sqlite_url(&database_path)?,
        log_file,
        debug: env::var("DEBUG").is_ok_and(|value| value != "0" && !value.is_empty()),
    })
}

/// Formats a path the way SQLx expects it:
/// `sqlite:///absolute/path` (3 slashes) or `sqlite://relative/path` (2 slashes).
fn sqlite_url(path: &Path) -> color_eyre::eyre::Result<String> {
    let path_str = path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    // Strip any leading slashes from the path to avoid double slashes
    let clean_path = path_str.trim_start_matches('/');

    if path.is_absolute() && path_str.starts_with('/') {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_get_three_slashes() -> color_eyre::eyre::Result<()> {
        let url = sqlite_url(Path::new("/tmp/traffic/dash.db"))?;
        assert_eq!(url, "sqlite:///tmp/traffic/dash.db");
        Ok(())
    }

    #[test]
    fn relative_paths_get_two_slashes() -> color_eyre::eyre::Result<()> {
        let url = sqlite_url(Path::new("data/dash.db"))?;
        assert_eq!(url, "sqlite://data/dash.db");
        Ok(())
    }
}
