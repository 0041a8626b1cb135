//! Label generation: render, encode and persist one label.

use chrono::{DateTime, Utc};
use label_engine::{LabelError, LabelFonts, LabelRequest};

use super::label_store::{LabelStore, LabelStoreError, SavedLabel};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to render label: {0}")]
    Render(#[from] LabelError),
    #[error("failed to save label: {0}")]
    Save(#[from] LabelStoreError),
}

/// Render `request` and save it as a new JPEG captured at `captured_at`.
pub fn generate_label(
    store: &LabelStore,
    fonts: &LabelFonts,
    request: &LabelRequest,
    jpeg_quality: u8,
    captured_at: DateTime<Utc>,
) -> Result<SavedLabel, GenerateError> {
    let img = label_engine::render_label(request, fonts)?;
    let jpeg = label_engine::encode_jpeg(&img, jpeg_quality)?;
    let saved = store.save(&jpeg, captured_at)?;
    tracing::info!(
        name = %saved.name,
        part_no = %request.part_no,
        batch_no = %request.batch_no,
        "Label generated"
    );
    Ok(saved)
}
