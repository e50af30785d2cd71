use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use carechart_clinic::config::ClinicConfig;
use carechart_clinic::infra::attachment::LocalAttachmentStore;
use carechart_clinic::router::build_router;
use carechart_clinic::state::AppState;
use carechart_core::tracing::init_tracing;
use carechart_domain::password::prepare_dummy_hash;
use carechart_session::gate::SessionKey;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,sqlx=warn");

    let config = ClinicConfig::from_env()?;

    if !tokio::task::spawn_blocking(prepare_dummy_hash)
        .await
        .context("dummy hash task panicked")?
    {
        tracing::warn!("dummy password hash unavailable; unknown-email logins skip verification");
    }

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db,
        session_key: SessionKey::new(config.session_secret),
        cookie_domain: config.cookie_domain,
        public_base_url: Arc::from(config.public_base_url),
        attachments: LocalAttachmentStore::new(config.upload_dir),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.clinic_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("clinic service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
