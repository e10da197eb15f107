use anyhow::Context;
use fleet_core::config::Config;
use fleet_server::AppState;
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>, empty: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    for w in config.validate() {
        tracing::warn!("config: {}", w.message);
    }

    let store = super::load_store(&config, empty)?;
    tracing::info!(
        ambulances = store.ambulances().len(),
        materials = store.materials(None).len(),
        "store ready"
    );

    let port = port.unwrap_or(config.server.port);
    let state = AppState::new(store, config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;

        tokio::select! {
            res = fleet_server::serve_on(state, listener) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
