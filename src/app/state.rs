use anyhow::Result;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::app::Config;
use crate::runtime::ScreenScope;
use crate::session::{FileTokenStore, MemoryTokenStore, SessionContext, TokenStore};

/// Everything a screen needs, owned by the entry point
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Backend client, unbound to any screen
    pub api: ApiClient,
    /// Current session
    pub session: SessionContext,
}

impl AppState {
    /// Build the client and session from configuration and run the startup check
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::from_config(&config.api)?;

        let store: Arc<dyn TokenStore> = if config.session.persist {
            Arc::new(FileTokenStore::new(config.session.resolved_file()?))
        } else {
            Arc::new(MemoryTokenStore::new())
        };
        let session = SessionContext::new(store);
        let phase = session.restore();
        tracing::debug!(?phase, base_url = %api.base_url(), "application state ready");

        Ok(Self::from_parts(config, api, session))
    }

    pub fn from_parts(config: Config, api: ApiClient, session: SessionContext) -> Self {
        Self {
            config,
            api,
            session,
        }
    }

    /// Open a screen: a scope plus a client bound to it
    pub fn open_screen(&self, name: &str) -> (ScreenScope, ApiClient) {
        let scope = ScreenScope::new(name);
        let client = scope.client(&self.api);
        (scope, client)
    }
}
