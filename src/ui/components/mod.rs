//! Reusable UI components

mod button;
mod dialog;

pub use button::{nav_button_width, render_nav_button, BUTTON_HEIGHT};
pub use dialog::{centered_rect, render_error_dialog, render_path_prompt};
