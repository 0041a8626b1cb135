//! Label font discovery.
//!
//! Looks for the configured font file first, then for DejaVu Sans in the
//! working directory, the user font directory and common system locations.
//! Finding nothing is not an error: the label engine falls back to its
//! built-in bitmap font.

use std::path::{Path, PathBuf};

use label_engine::LabelFonts;

const REGULAR_FILE: &str = "DejaVuSans.ttf";
const BOLD_FILE: &str = "DejaVuSans-Bold.ttf";

#[derive(Clone, Debug, Default)]
pub struct FontService {
    regular_path: Option<PathBuf>,
    bold_path: Option<PathBuf>,
}

impl FontService {
    pub fn new(regular_path: Option<PathBuf>, bold_path: Option<PathBuf>) -> Self {
        Self {
            regular_path,
            bold_path,
        }
    }

    /// Load regular and bold faces, falling back as far as the built-in font.
    pub fn load_fonts(&self) -> LabelFonts {
        let regular = find_font_data(self.regular_path.as_deref(), REGULAR_FILE);
        let bold = find_font_data(self.bold_path.as_deref(), BOLD_FILE);
        if regular.is_none() {
            tracing::warn!("No label font found, using built-in bitmap font");
        }
        LabelFonts::load(regular, bold)
    }
}

fn find_font_data(configured: Option<&Path>, file_name: &str) -> Option<Vec<u8>> {
    if let Some(path) = configured {
        match std::fs::read(path) {
            Ok(data) => {
                tracing::info!(path = %path.display(), "Using configured label font");
                return Some(data);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Configured font unreadable: {e}");
            }
        }
    }

    for path in font_candidates(file_name) {
        if let Ok(data) = std::fs::read(&path) {
            tracing::info!(path = %path.display(), "Using label font");
            return Some(data);
        }
    }
    None
}

fn font_candidates(file_name: &str) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(file_name)];
    if let Some(dir) = dirs::font_dir() {
        candidates.push(dir.join(file_name));
    }
    candidates.extend(system_font_dirs().iter().map(|dir| Path::new(dir).join(file_name)));
    candidates
}

fn system_font_dirs() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &["/Library/Fonts", "/System/Library/Fonts/Supplemental"]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
        ]
    }
}
