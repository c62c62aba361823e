pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, GeminiConfig, LoggingConfig};
pub use loader::load_config;
