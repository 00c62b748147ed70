pub mod config;
pub mod logging;
pub mod quoted;

pub use crate::config::AppConfig;
