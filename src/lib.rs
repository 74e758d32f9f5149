pub mod api;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use error::{BatchError, Result};
pub use service::{AttachmentStore, BatchCoordinator};
