pub mod hotkey;
pub mod logging;
pub mod overlay;
pub mod picker;
pub mod processes;
pub mod settings;
