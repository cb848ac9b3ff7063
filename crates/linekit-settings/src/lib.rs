//! LineKit Settings Crate
//!
//! Handles preview and export preferences and their persistence.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, ExportSettings, PreviewSettings};
pub use error::{SettingsError, SettingsResult};
