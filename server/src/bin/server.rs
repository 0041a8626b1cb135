//! Label station server binary.
//!
//! Serves the label generator and history screens over local HTTP.

use tracing_subscriber::EnvFilter;

use qr_label_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qr_label_lib=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting QR label station");

    let state = qr_label_lib::init_foundation()?;
    server::start_server(state).await
}
