//! # Sentiscope Common Library
//!
//! Shared code for the sentiscope service crates:
//! - Error types
//! - Configuration loading (TOML bootstrap + env + compiled defaults)
//! - Upload storage (filename sanitization, flat upload folder)
//! - Tabular model for uploaded and annotated CSV files

pub mod config;
pub mod error;
pub mod storage;
pub mod table;

pub use error::{Error, Result};
pub use storage::{sanitize_filename, UploadStore};
pub use table::{AnnotatedTable, ResultPreview, UploadedTable};
