use crate::db::{create_database_pool, load_model_choice, load_theme, save_model_choice, save_theme};
use crate::domain::Theme;
use crate::variant::Variant;
use color_eyre::Result;
use sqlx::SqlitePool;

/// Preference persistence. Without a database the choices live for the session only.
#[derive(Debug, Default)]
pub struct AppActions {
    pub db_pool: Option<SqlitePool>,
    session_model: Option<Variant>,
    session_theme: Option<Theme>,
}

impl AppActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_pool(pool: SqlitePool) -> Self {
        Self {
            db_pool: Some(pool),
            session_model: None,
            session_theme: None,
        }
    }

    pub async fn initialize(&mut self, database_url: &str) -> Result<()> {
        self.db_pool = Some(create_database_pool(database_url).await?);
        Ok(())
    }

    pub async fn model_choice(&self) -> Result<Variant> {
        match &self.db_pool {
            Some(pool) => Ok(load_model_choice(pool).await?),
            None => Ok(self.session_model.unwrap_or_default()),
        }
    }

    pub async fn remember_model(&mut self, variant: Variant) -> Result<()> {
        self.session_model = Some(variant);
        if let Some(pool) = &self.db_pool {
            save_model_choice(pool, variant).await?;
        }
        Ok(())
    }

    pub async fn theme(&self) -> Result<Theme> {
        match &self.db_pool {
            Some(pool) => Ok(load_theme(pool).await?),
            None => Ok(self.session_theme.unwrap_or_default()),
        }
    }

    pub async fn remember_theme(&mut self, theme: Theme) -> Result<()> {
        self.session_theme = Some(theme);
        if let Some(pool) = &self.db_pool {
            save_theme(pool, theme).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::tests::setup_test_db;

    #[tokio::test]
    async fn test_choices_survive_without_a_database() -> Result<()> {
        let mut actions = AppActions::new();
        assert_eq!(actions.model_choice().await?, Variant::Xgboost);

        actions.remember_model(Variant::Catboost).await?;
        actions.remember_theme(Theme::Light).await?;

        assert_eq!(actions.model_choice().await?, Variant::Catboost);
        assert_eq!(actions.theme().await?, Theme::Light);
        Ok(())
    }

    #[tokio::test]
    async fn test_choices_are_written_to_the_database() -> Result<()> {
        let pool = setup_test_db().await?;
        let mut actions = AppActions::with_pool(pool.clone());

        actions.remember_model(Variant::Hybrid).await?;

        // A fresh handle on the same pool sees the stored value
        let reader = AppActions::with_pool(pool);
        assert_eq!(reader.model_choice().await?, Variant::Hybrid);
        Ok(())
    }
}
