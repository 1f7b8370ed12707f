//! Application state shared by every handler.

use std::sync::Arc;

use crate::client::ClientResult;
use crate::config::AppConfig;
use crate::dashboard::pipeline::StepPolicy;
use crate::dashboard::{Bootstrap, DashboardClient};
use crate::upstream::{WetroApi, WetroClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub upstream: Arc<dyn WetroApi>,
    pub bootstrap: Arc<Bootstrap>,
}

impl AppState {
    /// Wire the real upstream and dashboard clients from configuration
    pub fn from_config(config: AppConfig) -> ClientResult<Self> {
        let upstream = WetroClient::new(&config.upstream)?;
        Self::with_upstream(config, Arc::new(upstream))
    }

    /// Same as [`AppState::from_config`] with a caller-supplied upstream
    pub fn with_upstream(config: AppConfig, upstream: Arc<dyn WetroApi>) -> ClientResult<Self> {
        let dashboard = DashboardClient::new(&config.dashboard)?;
        let bootstrap = Bootstrap::new(
            dashboard,
            StepPolicy::from_config(&config.dashboard),
            config.dashboard.login_url(&config.server.base_url),
        );

        Ok(Self {
            config: Arc::new(config),
            upstream,
            bootstrap: Arc::new(bootstrap),
        })
    }
}
