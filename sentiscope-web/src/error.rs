//! Error types for sentiscope-web
//!
//! Every variant maps to a plain-text response. Upload validation failures
//! are 400s with fixed, user-facing messages.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::classifier::ClassifierError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request carried no `file` part
    #[error("No file uploaded")]
    NoFileUploaded,

    /// `file` part present with an empty filename
    #[error("No selected file")]
    NoSelectedFile,

    /// Filename sanitizes to nothing
    #[error("Invalid file name")]
    InvalidFilename,

    /// Multipart body could not be read
    #[error("Invalid upload: {0}")]
    Multipart(String),

    /// Upload is not valid delimited tabular data
    #[error("Error reading file: {0}")]
    Read(String),

    /// Upload lacks the `text` column
    #[error("The uploaded file must have a 'text' column.")]
    MissingTextColumn,

    /// Requested result file does not exist
    #[error("Result file not found: {0}")]
    ResultNotFound(String),

    /// Stored result file could not be parsed
    #[error("Error reading result file: {0}")]
    CorruptResult(String),

    /// Classification adapter failed; the whole upload is aborted
    #[error("Sentiment classification failed: {0}")]
    Classification(#[from] ClassifierError),

    /// Filesystem or serialization failure
    #[error("Storage error: {0}")]
    Storage(sentiscope_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFileUploaded
            | ApiError::NoSelectedFile
            | ApiError::InvalidFilename
            | ApiError::Multipart(_)
            | ApiError::Read(_)
            | ApiError::MissingTextColumn => StatusCode::BAD_REQUEST,
            ApiError::ResultNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Classification(_) => StatusCode::BAD_GATEWAY,
            ApiError::CorruptResult(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sentiscope_common::Error> for ApiError {
    fn from(err: sentiscope_common::Error) -> Self {
        match err {
            sentiscope_common::Error::NotFound(name) => ApiError::ResultNotFound(name),
            sentiscope_common::Error::InvalidFilename(_) => ApiError::InvalidFilename,
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", message);
        } else {
            warn!(status = status.as_u16(), "{}", message);
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
