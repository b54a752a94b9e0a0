//! UI Routes - HTML pages for the sentiscope web interface
//!
//! - **Upload Form** (`upload_form`): landing page with the CSV upload form
//! - **Result Page** (`result_page`): column list and first rows of a result
//! - **Layout** (`layout`): shared page chrome and HTML escaping

use axum::{routing::get, Router};

use crate::AppState;

mod layout;
mod result_page;
mod upload_form;

pub use layout::escape_html;
pub use result_page::render_result;

use result_page::result_page;
use upload_form::upload_form_page;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(upload_form_page))
        .route("/result/:filename", get(result_page))
}
