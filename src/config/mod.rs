//! Configuration management for polygon-plugins

pub mod config;
pub mod demo;
pub mod plugins;


// Re-export main types for convenience
pub use config::Config;
pub use demo::DemoConfig;
pub use plugins::PluginConfig;
