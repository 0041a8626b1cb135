use std::sync::Arc;

use chrono_tz::Tz;
use label_engine::LabelFonts;

use crate::config::{self, AppConfig};
use crate::services::font::FontService;
use crate::services::label_store::LabelStore;

/// Application state shared by all axum handlers. Immutable after startup.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    store: LabelStore,
    /// Fonts are loaded once; the built-in font stands in when none was found.
    fonts: LabelFonts,
    timezone: Tz,
}

impl SharedState {
    /// Build state from config, discovering fonts on disk.
    pub fn new(config: AppConfig) -> Self {
        let fonts =
            FontService::new(config.font_path.clone(), config.bold_font_path.clone()).load_fonts();
        Self::with_fonts(config, fonts)
    }

    pub fn with_fonts(config: AppConfig, fonts: LabelFonts) -> Self {
        let store = LabelStore::new(config.save_dir.clone());
        let timezone = config::parse_timezone(&config.timezone);
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                store,
                fonts,
                timezone,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &LabelStore {
        &self.inner.store
    }

    pub fn fonts(&self) -> &LabelFonts {
        &self.inner.fonts
    }

    pub fn timezone(&self) -> Tz {
        self.inner.timezone
    }
}
