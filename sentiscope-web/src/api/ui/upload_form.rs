//! Upload form page

use axum::response::Html;

use super::layout::render_page;
use crate::api::upload::FILE_FIELD;

/// GET /
///
/// Static upload form posting a CSV to /upload
pub async fn upload_form_page() -> Html<String> {
    let body = format!(
        r#"        <p>Upload a CSV file with a <code>text</code> column. Every row is classified and
        the results are shown with added <code>sentiment</code> and <code>score</code> columns.</p>

        <h2>Upload CSV</h2>
        <form action="/upload" method="post" enctype="multipart/form-data">
            <input type="file" name="{field}" accept=".csv,text/csv">
            <button type="submit" class="button">Analyze</button>
        </form>"#,
        field = FILE_FIELD
    );

    Html(render_page(
        "Sentiment Analysis",
        "CSV sentiment annotation",
        &body,
    ))
}
