/// Database configuration and connection management
pub mod database;

/// Office settings loaded from config.toml
pub mod app;
