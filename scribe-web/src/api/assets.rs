//! Embedded static assets

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::ui;

/// GET /static/scribe.css
pub async fn serve_stylesheet() -> Response {
    (StatusCode::OK, [("content-type", "text/css")], ui::STYLESHEET).into_response()
}

/// GET /static/demo.js
pub async fn serve_demo_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        ui::DEMO_JS,
    )
        .into_response()
}
