//! QR code generation for label images.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::LabelError;

/// Quiet-zone width in modules around the symbol.
pub const QR_BORDER: u32 = 2;

/// Generate a square QR symbol for `data`, scaled to `target_size` pixels.
///
/// The version is the smallest that fits the data at error-correction level
/// M. `border` modules of white are kept around the symbol. Scaling uses
/// nearest-neighbour sampling so module edges stay sharp.
pub fn generate_qr(data: &str, target_size: u32, border: u32) -> Result<GrayImage, LabelError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let total_modules = module_count + border * 2;

    let scale = (target_size / total_modules).max(1);
    let img_size = total_modules * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count + border;
        let y = (i as u32) / module_count + border;

        if *color == qrcode::Color::Dark {
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
                }
            }
        }
    }

    if img_size == target_size {
        return Ok(img);
    }

    debug!(
        version = ?code.version(),
        module_count,
        img_size,
        target_size,
        "Resizing QR symbol"
    );
    Ok(imageops::resize(&img, target_size, target_size, FilterType::Nearest))
}
