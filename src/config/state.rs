// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::users::UserRepository;

/// Application state
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(config: Config, users: Arc<dyn UserRepository>) -> Self {
        Self { config, users }
    }
}
