// Application state (AppState)

use crate::api::client::Backend;
use crate::core::config::Config;
use crate::stores::repository::Repository;
use crate::table::query::Paging;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
///
/// Every handler reaches the backend through the repository, so all
/// requests share one cache.
#[derive(Clone)]
pub struct AppState {
    /// Cached access to courses, sections, schedule slots and users
    pub repo: Arc<Repository>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        let ttl = Duration::from_secs(config.cache.ttl_secs);

        Self {
            repo: Arc::new(Repository::new(backend, ttl)),
            config: Arc::new(config),
        }
    }

    /// Table page size and page-button window
    pub fn paging(&self) -> Paging {
        Paging {
            page_size: self.config.table.page_size,
            window: self.config.table.page_window,
        }
    }
}
