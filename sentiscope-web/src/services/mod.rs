//! Request orchestration services

pub mod annotator;

pub use annotator::{annotate_upload, load_result_preview, UploadOutcome};
