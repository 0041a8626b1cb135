//! Label rendering for part/batch labels.
//!
//! Builds the QR payload from the six label fields, encodes it as a QR
//! symbol and composes header, detail lines and symbol onto a fixed-size
//! 100mm x 50mm canvas at 300 DPI.

pub mod compose;
pub mod label;
pub mod payload;
pub mod qr;
pub mod text;

pub use label::{encode_jpeg, render_label, LABEL_HEIGHT, LABEL_WIDTH};
pub use payload::{LabelRequest, HEADER};
pub use qr::generate_qr;
pub use text::{LabelFont, LabelFonts};

/// Errors raised while rendering or encoding a label.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("QR encode error: {0}")]
    QrEncode(#[from] qrcode::types::QrError),
    #[error("image encode error: {0}")]
    ImageEncode(#[from] image::ImageError),
}
