pub mod api;
pub mod core;
pub mod providers;
pub mod store;

use crate::api::AppState;
use crate::core::config::AppConfig;
use crate::core::sync::SyncRunner;
use crate::providers::fold::FoldClient;
use crate::providers::mfapi::MfapiProvider;
use crate::providers::unfold::UnfoldRunner;
use crate::store::holdings::HoldingsStore;
use crate::store::session::SessionStore;
use crate::store::transactions::TransactionLog;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub async fn run(config: AppConfig) -> Result<()> {
    info!("Fund tracker backend starting...");
    debug!("Loaded config: {config:#?}");

    let fold_base = config
        .providers
        .fold
        .as_ref()
        .map_or("https://api.fold.money/v1", |p| &p.base_url);
    let mfapi_base = config
        .providers
        .mfapi
        .as_ref()
        .map_or("https://api.mfapi.in", |p| &p.base_url);

    // The session file doubles as the sync tool's configuration.
    let session = Arc::new(SessionStore::new(&config.session_path));
    let runner: Arc<dyn SyncRunner> =
        Arc::new(UnfoldRunner::new(&config.sync_binary, session.path()));
    let state = AppState {
        holdings: Arc::new(HoldingsStore::new(&config.holdings_path)),
        session,
        fold: Arc::new(FoldClient::new(fold_base)?),
        prices: Arc::new(MfapiProvider::new(mfapi_base)?),
        transactions: Arc::new(TransactionLog::new(&config.db_path, Arc::clone(&runner))),
        sync: runner,
    };

    let app = api::build_router(state, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    info!("Listening on {}", config.listen);

    axum::serve(listener, app).await.context("Server error")
}
