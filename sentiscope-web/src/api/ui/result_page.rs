//! Result page: column list plus the first rows of an annotated table

use axum::{
    extract::{Path, State},
    response::Html,
};
use sentiscope_common::ResultPreview;

use super::layout::{escape_html, render_page};
use crate::error::ApiResult;
use crate::services::load_result_preview;
use crate::AppState;

/// GET /result/:filename
pub async fn result_page(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Html<String>> {
    let preview = load_result_preview(&state.store, &filename).await?;
    Ok(Html(render_result(&filename, &preview)))
}

/// Render a preview as an HTML page
pub fn render_result(filename: &str, preview: &ResultPreview) -> String {
    let columns: String = preview
        .columns
        .iter()
        .map(|c| format!("            <li>{}</li>\n", escape_html(c)))
        .collect();

    let header_cells: String = preview
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(c)))
        .collect();

    let body_rows: String = preview
        .rows
        .iter()
        .map(|(index, cells)| {
            let cells: String = cells
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                .collect();
            format!("                <tr><th>{}</th>{}</tr>\n", index, cells)
        })
        .collect();

    let body = format!(
        r#"        <h2>Columns</h2>
        <ul class="columns">
{columns}        </ul>

        <h2>Preview</h2>
        <p>Showing {shown} of {total} rows.</p>
        <table class="data">
            <thead>
                <tr><th></th>{header_cells}</tr>
            </thead>
            <tbody>
{body_rows}            </tbody>
        </table>

        <p><a href="/" class="button">Analyze another file</a></p>"#,
        columns = columns,
        shown = preview.rows.len(),
        total = preview.total_rows,
        header_cells = header_cells,
        body_rows = body_rows,
    );

    render_page("Sentiment Analysis Results", filename, &body)
}
