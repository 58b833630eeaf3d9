use std::sync::Arc;
use tokio::sync::Mutex;

use crate::pipeline::Ticker;
use crate::predict::ModelSource;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn ModelSource>,
    pub ticker: Arc<Mutex<Ticker>>,
}
