use crate::auth::{TokenIssuer, TokenVerifier};
use crate::config::ServerConfig;
use crate::identity::IdentityDeriver;
use enrol_db::UserStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<ServerConfig>,
    pub deriver: Arc<IdentityDeriver>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Create a new app state around an explicit store handle
    pub fn new(store: Arc<dyn UserStore>, config: ServerConfig) -> Self {
        Self {
            store,
            deriver: Arc::new(IdentityDeriver::new(config.auth.id_salt.as_bytes())),
            issuer: Arc::new(TokenIssuer::new(&config.auth)),
            verifier: Arc::new(TokenVerifier::new(&config.auth)),
            config: Arc::new(config),
        }
    }
}
