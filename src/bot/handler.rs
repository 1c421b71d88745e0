use std::sync::Arc;

use crate::utils::board::RequestBoard;
use crate::utils::config::Config;

/// Application context shared by every event.
pub struct Handler {
    pub config: Config,
    pub board: Arc<RequestBoard>,
}

impl Handler {
    pub fn new(config: Config) -> Self {
        let board = Arc::new(RequestBoard::new(config.claim_listener));
        Handler { config, board }
    }
}
