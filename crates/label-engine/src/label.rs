//! Label canvas layout and JPEG encoding.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use tracing::debug;

use crate::compose;
use crate::payload::{LabelRequest, HEADER};
use crate::qr::{self, QR_BORDER};
use crate::text::{self, LabelFonts};
use crate::LabelError;

pub const DPI: u32 = 300;
pub const WIDTH_MM: u32 = 100;
pub const HEIGHT_MM: u32 = 50;

pub const LABEL_WIDTH: u32 = mm_to_px(WIDTH_MM);
pub const LABEL_HEIGHT: u32 = mm_to_px(HEIGHT_MM);

pub const HEADER_FONT_SIZE: f32 = 40.0;
pub const HEADER_Y: i32 = 10;
pub const DETAIL_FONT_SIZE: f32 = 30.0;
pub const DETAIL_X: i32 = 10;
/// Top offset of each detail line, in print order.
pub const DETAIL_Y: [i32; 6] = [70, 120, 170, 220, 270, 320];

pub const QR_SIZE: u32 = LABEL_HEIGHT / 2;
pub const QR_MARGIN: u32 = 20;
pub const QR_X: u32 = LABEL_WIDTH - QR_SIZE - QR_MARGIN;
pub const QR_Y: u32 = DETAIL_Y[0] as u32;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Millimetres to pixels at `DPI`, rounded to the nearest pixel.
const fn mm_to_px(mm: u32) -> u32 {
    (mm * DPI * 20 + 254) / 508
}

/// Render a label: header, six detail lines and the QR symbol of the payload.
///
/// The canvas size never depends on the field contents; text that does not
/// fit is clipped.
pub fn render_label(request: &LabelRequest, fonts: &LabelFonts) -> Result<RgbImage, LabelError> {
    let payload = request.qr_payload();
    let symbol = qr::generate_qr(&payload, QR_SIZE, QR_BORDER)?;

    let mut img = RgbImage::from_pixel(LABEL_WIDTH, LABEL_HEIGHT, WHITE);

    text::draw_centered_text(&mut img, &fonts.bold, HEADER_FONT_SIZE, HEADER_Y, HEADER, BLACK);

    for (y, line) in DETAIL_Y.iter().zip(request.detail_lines()) {
        text::draw_text(&mut img, &fonts.regular, DETAIL_FONT_SIZE, DETAIL_X, *y, &line, BLACK);
    }

    compose::paste_gray(&mut img, &symbol, QR_X, QR_Y);

    debug!(
        payload_len = payload.len(),
        builtin_font = fonts.regular.is_builtin(),
        "Label rendered"
    );
    Ok(img)
}

/// Encode a rendered label as baseline JPEG.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, LabelError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    img.write_with_encoder(encoder)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_dimensions_match_300_dpi() {
        assert_eq!(LABEL_WIDTH, 1181);
        assert_eq!(LABEL_HEIGHT, 591);
        assert_eq!(QR_SIZE, 295);
        assert_eq!(QR_X, 866);
    }

    #[test]
    fn render_label_has_fixed_dimensions() {
        let img = render_label(&LabelRequest::default(), &LabelFonts::builtin()).unwrap();
        assert_eq!(img.dimensions(), (LABEL_WIDTH, LABEL_HEIGHT));
    }

    #[test]
    fn render_label_ignores_field_length_for_dimensions() {
        let req = LabelRequest {
            part_name: "LONG ".repeat(40),
            batch_no: String::new(),
            ..LabelRequest::default()
        };
        let img = render_label(&req, &LabelFonts::builtin()).unwrap();
        assert_eq!(img.dimensions(), (LABEL_WIDTH, LABEL_HEIGHT));
    }

    fn decode_qr_region(req: &LabelRequest) -> String {
        let img = render_label(req, &LabelFonts::builtin()).unwrap();
        let jpeg = encode_jpeg(&img, DEFAULT_JPEG_QUALITY).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap().to_luma8();
        let region = image::imageops::crop_imm(&decoded, QR_X, QR_Y, QR_SIZE, QR_SIZE).to_image();

        let mut prepared = rqrr::PreparedImage::prepare(region);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn qr_region_decodes_to_payload_after_jpeg() {
        let req = LabelRequest::default();
        assert_eq!(decode_qr_region(&req), req.qr_payload());
    }

    #[test]
    fn qr_region_decodes_long_fields() {
        let req = LabelRequest {
            part_name: "MAIN HOUSING ASSEMBLY ".repeat(6),
            invoice_no: "INV/2024/08/000123".into(),
            batch_no: String::new(),
            ..LabelRequest::default()
        };
        assert_eq!(decode_qr_region(&req), req.qr_payload());
    }

    #[test]
    fn header_is_drawn_near_the_top() {
        let img = render_label(&LabelRequest::default(), &LabelFonts::builtin()).unwrap();
        let header_band_dark = (0..LABEL_WIDTH)
            .flat_map(|x| (10..60).map(move |y| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y)[0] < 128);
        assert!(header_band_dark);
    }

    #[test]
    fn area_below_content_stays_white() {
        let img = render_label(&LabelRequest::default(), &LabelFonts::builtin()).unwrap();
        for x in 0..LABEL_WIDTH {
            for y in (QR_Y + QR_SIZE)..LABEL_HEIGHT {
                assert_eq!(img.get_pixel(x, y), &WHITE, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn encode_jpeg_produces_jpeg_bytes() {
        let img = render_label(&LabelRequest::default(), &LabelFonts::builtin()).unwrap();
        let bytes = encode_jpeg(&img, DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), LABEL_WIDTH);
        assert_eq!(decoded.height(), LABEL_HEIGHT);
    }
}
