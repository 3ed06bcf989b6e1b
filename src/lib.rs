pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::ReportError;
pub use service::{consolidate, PremiationEngine};
