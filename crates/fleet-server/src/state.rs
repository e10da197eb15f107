use fleet_core::config::Config;
use fleet_core::store::Store;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub config: Arc<Config>,
    pub event_tx: broadcast::Sender<u64>,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
            event_tx: tx,
        }
    }

    /// Tell change-feed subscribers that the store moved to `revision`.
    /// Having no subscribers is fine.
    pub fn notify(&self, revision: u64) {
        let _ = self.event_tx.send(revision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_reaches_subscribers() {
        let state = AppState::new(Store::new(), Config::default());
        let mut rx = state.event_tx.subscribe();
        state.notify(7);
        assert_eq!(rx.recv().await.unwrap(), 7);
    }

    #[test]
    fn notify_without_subscribers_is_silent() {
        let state = AppState::new(Store::new(), Config::default());
        state.notify(1);
    }
}
