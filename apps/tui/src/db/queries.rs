use crate::domain::Theme;
use crate::variant::Variant;
use sqlx::{query, query_scalar, SqlitePool};

/// Key written by the model-selection screen and read by the expert dashboard.
pub const MODEL_KEY: &str = "selectedPredictionModel";
pub const THEME_KEY: &str = "theme";

pub async fn get_preference(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    query_scalar("SELECT value FROM preferences WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

pub async fn set_preference(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO preferences (key, value, updated) VALUES (?, ?, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Reads the persisted model choice, falling back to XGBoost.
pub async fn load_model_choice(pool: &SqlitePool) -> Result<Variant, sqlx::Error> {
    let stored = get_preference(pool, MODEL_KEY).await?;
    if let Some(value) = stored.as_deref() {
        if Variant::parse(value).is_none() {
            log::warn!("Ignoring unknown stored model {value:?}, using xgboost");
        }
    }
    Ok(Variant::from_stored(stored.as_deref()))
}

pub async fn save_model_choice(pool: &SqlitePool, variant: Variant) -> Result<(), sqlx::Error> {
    set_preference(pool, MODEL_KEY, variant.as_str()).await
}

pub async fn load_theme(pool: &SqlitePool) -> Result<Theme, sqlx::Error> {
    let stored = get_preference(pool, THEME_KEY).await?;
    Ok(stored.as_deref().and_then(Theme::parse).unwrap_or_default())
}

pub async fn save_theme(pool: &SqlitePool, theme: Theme) -> Result<(), sqlx::Error> {
    set_preference(pool, THEME_KEY, theme.as_str()).await
}
