//! HTTP handlers grouped by screen.

pub mod labels;
pub mod screens;

use axum::http::StatusCode;
use axum::response::Html;

use crate::services::label_store::LabelStoreError;

use super::pages::error_page;

type PageError = (StatusCode, Html<String>);

/// Standard error response.
pub fn err_page(status: StatusCode, message: &str) -> PageError {
    (status, Html(error_page(message)))
}

/// Map a save-directory error onto an HTTP status.
pub fn store_status(err: &LabelStoreError) -> StatusCode {
    match err {
        LabelStoreError::InvalidName(_) => StatusCode::BAD_REQUEST,
        LabelStoreError::NotFound(_) => StatusCode::NOT_FOUND,
        LabelStoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
