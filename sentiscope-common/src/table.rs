//! Tabular model for uploaded and annotated CSV files
//!
//! Input and output tables are comma-separated with a header row. An upload
//! must carry a `text` column; annotation adds `sentiment` and `score`.

use crate::{Error, Result};

/// Column holding the text to classify
pub const TEXT_COLUMN: &str = "text";
/// Column holding the predicted label
pub const SENTIMENT_COLUMN: &str = "sentiment";
/// Column holding the label confidence
pub const SCORE_COLUMN: &str = "score";
/// Number of rows shown on the result page
pub const PREVIEW_ROWS: usize = 5;

/// Parse CSV bytes into a header list and rows of string cells
fn parse_csv(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::Csv("No columns to parse from file".to_string()));
    }

    // Short rows are padded with empty cells; long rows are an error
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(Error::Csv(format!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            )));
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok((headers, rows))
}

fn write_csv(headers: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// A parsed upload, rows in file order
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl UploadedTable {
    /// Parse raw upload bytes
    ///
    /// Fails with [`Error::Csv`] on invalid UTF-8, a row longer than the
    /// header or a missing header row. Rows shorter than the header are
    /// padded with empty cells. Does not check for the `text` column.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let (headers, rows) = parse_csv(bytes)?;
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_text_column(&self) -> bool {
        self.column_index(TEXT_COLUMN).is_some()
    }

    /// Values of the `text` column, in row order
    pub fn texts(&self) -> Result<Vec<&str>> {
        let idx = self.column_index(TEXT_COLUMN).ok_or_else(|| {
            Error::InvalidInput(format!("missing required '{}' column", TEXT_COLUMN))
        })?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or_default())
            .collect())
    }

    /// Attach one `(label, score)` per row, in row order
    ///
    /// Existing `sentiment`/`score` columns are overwritten in place;
    /// otherwise both are appended, `sentiment` first.
    pub fn annotate<I>(self, annotations: I) -> Result<AnnotatedTable>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let annotations: Vec<(String, f64)> = annotations.into_iter().collect();
        if annotations.len() != self.rows.len() {
            return Err(Error::InvalidInput(format!(
                "expected {} annotations, got {}",
                self.rows.len(),
                annotations.len()
            )));
        }

        let mut headers = self.headers;
        let sentiment_idx = column_or_append(&mut headers, SENTIMENT_COLUMN);
        let score_idx = column_or_append(&mut headers, SCORE_COLUMN);

        let rows = self
            .rows
            .into_iter()
            .zip(annotations)
            .map(|(mut row, (label, score))| {
                row.resize(headers.len(), String::new());
                row[sentiment_idx] = label;
                row[score_idx] = score.to_string();
                row
            })
            .collect();

        Ok(AnnotatedTable { headers, rows })
    }
}

fn column_or_append(headers: &mut Vec<String>, name: &str) -> usize {
    match headers.iter().position(|h| h == name) {
        Some(idx) => idx,
        None => {
            headers.push(name.to_string());
            headers.len() - 1
        }
    }
}

/// An upload with `sentiment` and `score` attached to every row
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl AnnotatedTable {
    /// Parse a previously written result file
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let (headers, rows) = parse_csv(bytes)?;
        Ok(Self { headers, rows })
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        write_csv(&self.headers, &self.rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parsed `score` column values; unparsable cells are `None`
    pub fn scores(&self) -> Vec<Option<f64>> {
        let idx = self.headers.iter().position(|h| h == SCORE_COLUMN);
        self.rows
            .iter()
            .map(|row| {
                idx.and_then(|i| row.get(i))
                    .and_then(|cell| cell.parse::<f64>().ok())
            })
            .collect()
    }

    /// First [`PREVIEW_ROWS`] rows plus the full column list
    pub fn preview(&self) -> ResultPreview {
        ResultPreview {
            columns: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .take(PREVIEW_ROWS)
                .cloned()
                .enumerate()
                .collect(),
            total_rows: self.rows.len(),
        }
    }
}

/// Truncated view of a result table for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPreview {
    pub columns: Vec<String>,
    /// `(row index, cells)` for the previewed rows
    pub rows: Vec<(usize, Vec<String>)>,
    pub total_rows: usize,
}
