//! Docsage Core — error types, configuration, text and vector utilities.

pub mod config;
pub mod error;
pub mod text;

pub use config::{AppConfig, LlmConfig};
pub use error::{Error, Result};
