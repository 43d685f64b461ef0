use crate::{config::AppConfig, panel::AdminPanel};

/// Shared by every route. The panel is a cheap handle around its own lock.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub panel: AdminPanel,
}

impl AppState {
    pub fn new(config: AppConfig, panel: AdminPanel) -> Self {
        Self { config, panel }
    }
}
