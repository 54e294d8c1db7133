pub mod common;
pub mod expert;
pub mod home;
pub mod model_selection;
pub mod roads;
