pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod event;
pub mod map;
pub mod selection;
pub mod terminal;
pub mod ui;
pub mod variant;

pub use domain::{LatLng, LocalEvent, PredictionTime};
pub use variant::Variant;
