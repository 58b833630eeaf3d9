use thiserror::Error;

use crate::predict::PredictError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("ticker already running")]
    AlreadyRunning,
    #[error("sample step out of range: {0}")]
    InvalidStep(String),
    #[error("position model error: {0}")]
    Predict(#[from] PredictError),
}
