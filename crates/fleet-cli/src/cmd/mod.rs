pub mod alerts;
pub mod config;
pub mod import;
pub mod init;
pub mod serve;

use fleet_core::config::Config;
use fleet_core::seed;
use fleet_core::store::Store;

/// The in-memory store commands operate on: the demo fleet when
/// `server.seed_demo_data` is on, otherwise empty.
pub(crate) fn load_store(config: &Config, force_empty: bool) -> anyhow::Result<Store> {
    let mut store = Store::new();
    if config.server.seed_demo_data && !force_empty {
        seed::seed(&mut store)?;
    }
    Ok(store)
}
