//! Generator and history screens.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::Form;
use label_engine::LabelRequest;
use serde::Deserialize;

use crate::app::SharedState;
use crate::server::pages::{self, Flash, Page};
use crate::services::generator;
use crate::services::history;

use super::{err_page, store_status};

type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub page: Option<String>,
    pub view: Option<String>,
    /// Label just written by `POST /generate`.
    pub generated: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
    /// Form values to pre-fill; absent fields take the defaults.
    #[serde(flatten)]
    pub request: LabelRequest,
}

/// GET / – render the screen selected by `?page=`
pub async fn index(State(state): State<SharedState>, Query(q): Query<IndexQuery>) -> PageResult {
    let flash = Flash::from_query(q.notice, q.error);
    match Page::from_query(q.page.as_deref()) {
        Page::Main => Ok(Html(pages::generator::render(
            &q.request,
            q.generated.as_deref(),
            flash.as_ref(),
        ))),
        Page::History => render_history(&state, q.view.as_deref(), flash.as_ref()),
    }
}

/// POST /generate – render and save a new label, then redirect to its preview
pub async fn generate(
    State(state): State<SharedState>,
    Form(request): Form<LabelRequest>,
) -> Result<Redirect, (StatusCode, Html<String>)> {
    let result = generator::generate_label(
        state.store(),
        state.fonts(),
        &request,
        state.config().jpeg_quality,
        chrono::Utc::now(),
    );

    match result {
        Ok(saved) => Ok(Redirect::to(&pages::generated_location(&saved.name, &request))),
        Err(e) => {
            tracing::error!("Label generation failed: {e}");
            let flash = Flash::Error(e.to_string());
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::generator::render(&request, None, Some(&flash))),
            ))
        }
    }
}

/// Rescan the save directory and render the history screen.
fn render_history(state: &SharedState, viewing: Option<&str>, flash: Option<&Flash>) -> PageResult {
    let labels = state
        .store()
        .list()
        .map_err(|e| err_page(store_status(&e), &format!("Failed to list labels: {e}")))?;
    let days = history::build_history(labels, state.timezone());
    Ok(Html(pages::history::render(&days, viewing, flash)))
}
