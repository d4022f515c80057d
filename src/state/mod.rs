//! Application state module

mod app_state;
mod focus;
mod loading_state;
mod prompt;
mod text_input;

pub use app_state::*;
pub use loading_state::*;
pub use prompt::*;
pub use text_input::*;
