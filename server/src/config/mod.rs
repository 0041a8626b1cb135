//! Configuration: defaults, `.env` loading and environment overrides.

pub mod app_config;

pub use app_config::AppConfig;

use chrono_tz::Tz;

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Resolve an IANA timezone name, falling back to India Standard Time.
pub fn parse_timezone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|_| {
        tracing::warn!(timezone = name, "Unknown timezone, using Asia/Kolkata");
        chrono_tz::Asia::Kolkata
    })
}
