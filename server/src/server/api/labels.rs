//! Label image serving and deletion.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, Redirect, Response};
use serde::Deserialize;

use crate::app::SharedState;
use crate::server::pages::{self, Flash};

use super::{err_page, store_status};

#[derive(Debug, Default, Deserialize)]
pub struct LabelQuery {
    #[serde(default)]
    pub download: bool,
}

/// GET /labels/{name} – JPEG bytes, as attachment with `?download=true`
pub async fn get_label(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(q): Query<LabelQuery>,
) -> Result<Response, (StatusCode, Html<String>)> {
    let data = state
        .store()
        .read(&name)
        .map_err(|e| err_page(store_status(&e), &e.to_string()))?;

    let mut builder = Response::builder()
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CACHE_CONTROL, "no-cache");
    if q.download {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", name.replace('"', "_")),
        );
    }

    builder
        .body(Body::from(data))
        .map_err(|e| err_page(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))
}

/// POST /labels/{name}/delete – remove the file and redirect to history
pub async fn delete_label(State(state): State<SharedState>, Path(name): Path<String>) -> Redirect {
    let flash = match state.store().delete(&name) {
        Ok(()) => Flash::Success(format!("Deleted {name}")),
        Err(e) => {
            tracing::warn!(name = %name, "Failed to delete label: {e}");
            Flash::Error(format!("Error deleting {name}: {e}"))
        }
    };
    Redirect::to(&pages::history_location(&flash))
}
