//! Shared application state
//!
//! Cloned into every handler by axum. Everything inside is either an `Arc`
//! or cheap to clone.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub repositories: Repositories,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repositories: Repositories) -> Self {
        let jwt = JwtService::from_config(&config);
        Self {
            config: Arc::new(config),
            repositories,
            jwt,
        }
    }
}
