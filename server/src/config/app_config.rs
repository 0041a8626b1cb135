//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;

use label_engine::label::DEFAULT_JPEG_QUALITY;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_SAVE_DIR: &str = "qr_code_images";
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Runtime configuration. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Directory holding every generated label; also the history source.
    pub save_dir: PathBuf,
    /// Explicit regular font file; searched in standard locations when unset.
    pub font_path: Option<PathBuf>,
    /// Explicit bold font file; searched in standard locations when unset.
    pub bold_font_path: Option<PathBuf>,
    /// IANA zone used when displaying capture times.
    pub timezone: String,
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.into(),
            server_port: DEFAULT_PORT,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            font_path: None,
            bold_font_path: None,
            timezone: DEFAULT_TIMEZONE.into(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset or empty keys
    /// take defaults; unparseable values are logged and replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };

        let server_host = {
            let h = g("SERVER_HOST");
            if h.is_empty() { DEFAULT_HOST.into() } else { h }
        };
        let save_dir = {
            let d = g("QR_SAVE_DIR");
            if d.is_empty() { PathBuf::from(DEFAULT_SAVE_DIR) } else { PathBuf::from(d) }
        };
        let timezone = {
            let tz = g("DISPLAY_TIMEZONE");
            if tz.is_empty() { DEFAULT_TIMEZONE.into() } else { tz }
        };

        Self {
            server_host,
            server_port: parse_or("SERVER_PORT", &g("SERVER_PORT"), DEFAULT_PORT),
            save_dir,
            font_path: optional_path(&g("LABEL_FONT_PATH")),
            bold_font_path: optional_path(&g("LABEL_BOLD_FONT_PATH")),
            timezone,
            jpeg_quality: parse_or("JPEG_QUALITY", &g("JPEG_QUALITY"), DEFAULT_JPEG_QUALITY)
                .clamp(1, 100),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    match s.parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(key, value = s, "Invalid setting value, using default");
            default
        }
    }
}

fn optional_path(s: &str) -> Option<PathBuf> {
    if s.is_empty() { None } else { Some(PathBuf::from(s)) }
}
