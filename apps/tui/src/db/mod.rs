pub mod migrations;
pub mod queries;

pub use migrations::{create_database_pool, setup_database};
pub use queries::{load_model_choice, load_theme, save_model_choice, save_theme};
