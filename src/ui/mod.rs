pub mod colors;
mod input;
mod layout;
mod pie;
pub mod storage_bar;
mod surface;
mod tooltip;

pub use colors::ColorScheme;
pub use input::{handle_key, Command, InputMode};
pub use layout::render_ui;
pub use pie::PieHitArea;
pub use storage_bar::BarHitArea;
pub use surface::TerminalSurface;
