//! Upload annotation workflow
//!
//! store → parse → validate → classify every row → persist result.
//! Each step is awaited in sequence; any failure aborts the request and no
//! result file is written.

use std::time::Instant;

use sentiscope_common::storage::result_file_name;
use sentiscope_common::{sanitize_filename, AnnotatedTable, ResultPreview, UploadStore, UploadedTable};
use tracing::{debug, info};

use crate::classifier::{ClassifierError, SentimentClassifier};
use crate::error::{ApiError, ApiResult};

/// What a successful upload produced
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Sanitized name the upload was stored under
    pub stored_name: String,
    /// `result_<stored_name>`
    pub result_name: String,
    /// Number of classified rows
    pub rows: usize,
}

/// Store, validate, classify and persist one uploaded file
pub async fn annotate_upload(
    store: &UploadStore,
    classifier: &dyn SentimentClassifier,
    filename: &str,
    bytes: &[u8],
) -> ApiResult<UploadOutcome> {
    let started = Instant::now();

    let stored_name = sanitize_filename(filename);
    if stored_name.is_empty() {
        return Err(ApiError::InvalidFilename);
    }

    let path = store.store(&stored_name, bytes).await?;
    debug!(path = %path.display(), "Saved upload");

    let table = UploadedTable::from_csv_bytes(bytes).map_err(|e| ApiError::Read(e.to_string()))?;

    // Schema check before any model call
    let texts = table.texts().map_err(|_| ApiError::MissingTextColumn)?;
    let row_count = texts.len();

    let predictions = classifier.classify_batch(&texts).await?;
    if predictions.len() != row_count {
        return Err(ClassifierError::Parse(format!(
            "expected {} predictions, got {}",
            row_count,
            predictions.len()
        ))
        .into());
    }

    let annotated = table.annotate(predictions.into_iter().map(|p| (p.label, p.score)))?;
    let result_name = result_file_name(&stored_name);
    store
        .store_atomic(&result_name, &annotated.to_csv_bytes()?)
        .await?;

    info!(
        upload = %stored_name,
        result = %result_name,
        rows = row_count,
        model = classifier.model_name(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Annotated upload"
    );

    Ok(UploadOutcome {
        stored_name,
        result_name,
        rows: row_count,
    })
}

/// Load a stored result file and cut it down to the preview
pub async fn load_result_preview(store: &UploadStore, filename: &str) -> ApiResult<ResultPreview> {
    let name = sanitize_filename(filename);
    if name.is_empty() {
        return Err(ApiError::ResultNotFound(filename.to_string()));
    }

    let bytes = store.load(&name).await?;
    let table =
        AnnotatedTable::from_csv_bytes(&bytes).map_err(|e| ApiError::CorruptResult(e.to_string()))?;

    Ok(table.preview())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SentimentResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Labels by text length, counts calls
    struct LengthClassifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SentimentClassifier for LengthClassifier {
        async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SentimentResult {
                label: if text.len() > 10 { "LONG" } else { "SHORT" }.to_string(),
                score: 0.5,
            })
        }

        fn model_name(&self) -> &str {
            "length"
        }
    }

    fn classifier() -> LengthClassifier {
        LengthClassifier {
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_annotate_upload_writes_result() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());
        let classifier = classifier();

        let outcome = annotate_upload(
            &store,
            &classifier,
            "reviews.csv",
            b"text\nshort\nthis one is long\n",
        )
        .await
        .unwrap();

        assert_eq!(outcome.stored_name, "reviews.csv");
        assert_eq!(outcome.result_name, "result_reviews.csv");
        assert_eq!(outcome.rows, 2);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 2);

        let result = store.load("result_reviews.csv").await.unwrap();
        assert_eq!(
            String::from_utf8(result).unwrap(),
            "text,sentiment,score\nshort,SHORT,0.5\nthis one is long,LONG,0.5\n"
        );
    }

    #[tokio::test]
    async fn test_schema_checked_before_classification() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());
        let classifier = classifier();

        let err = annotate_upload(&store, &classifier, "a.csv", b"body\nhello\n")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::MissingTextColumn));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
        assert!(!store.exists("result_a.csv").await);
    }

    #[tokio::test]
    async fn test_preview_of_missing_result() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());

        let err = load_result_preview(&store, "result_nothing.csv")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ResultNotFound(_)));
    }
}
