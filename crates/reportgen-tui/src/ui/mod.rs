//! UI rendering components.

mod crash;
pub mod dialogs;
pub mod form;
pub mod input;
mod layout;
pub mod logs;
pub mod preview;

pub use crash::render_crash;
pub use layout::render;
