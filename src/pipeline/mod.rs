mod config;
mod error;
mod tick;
mod ticker;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use tick::{run_tick, TickReport};
pub use ticker::{Ticker, TickerStatus};
