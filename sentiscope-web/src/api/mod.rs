//! HTTP API handlers for sentiscope-web

pub mod buildinfo;
pub mod health;
pub mod ui;
pub mod upload;

pub use buildinfo::{get_build_info, BuildInfo};
pub use health::health_routes;
pub use ui::ui_routes;
pub use upload::upload_file;
