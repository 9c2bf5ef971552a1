#[cfg(feature = "cli")]
pub mod cli;
pub mod order_file;
pub mod toml_config;

pub use order_file::{OrderFile, OrderPick};
pub use toml_config::{AppConfig, LogFormat, DEFAULT_CONFIG_FILE};
