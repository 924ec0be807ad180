//! Configuration: user settings, file formats and path resolution.

mod app;
mod format;
mod path;

pub use app::{default_config_path, AppConfig, CONFIG_ENV};
pub use format::ConfigFormat;
pub use path::{home_dir, resolve_path};
