pub mod app;
pub mod config;
pub mod server;
pub mod services;

use config::AppConfig;

/// Load configuration, prepare the save directory and build shared state.
pub fn init_foundation() -> Result<app::SharedState, anyhow::Error> {
    config::load_dotenv();
    let config = AppConfig::from_env();

    let state = app::SharedState::new(config);
    state.store().ensure_dir()?;

    tracing::info!(
        save_dir = %state.store().save_dir().display(),
        timezone = state.timezone().name(),
        builtin_font = state.fonts().regular.is_builtin(),
        "Settings loaded"
    );
    Ok(state)
}
