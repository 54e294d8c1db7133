//! Screen state. Network work is queued as `Command`s and run by the event loop.

pub mod actions;
pub mod commands;
pub mod display;
pub mod expert;
pub mod input;
pub mod roads;
pub mod state;
pub mod submit;

pub use commands::{Command, Reply};
pub use input::{handle_input, handle_mouse};
pub use state::{App, AppScreen};
