//! Dialog components for TUI

mod base;
mod error_dialog;
mod path_prompt;

pub use base::centered_rect;
pub use error_dialog::render_error_dialog;
pub use path_prompt::render_path_prompt;
