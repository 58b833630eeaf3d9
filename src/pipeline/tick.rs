use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::config::PipelineConfig;
use super::error::PipelineError;
use crate::predict::ModelSource;
use crate::sampler::{sample_series, TimeSeries};
use crate::spectrum::{analyze, find_peaks, Peak, PeakPair, Spectrum};

/// Everything one tick produced.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TickReport {
    pub tick: u64,
    pub reference: DateTime<Utc>,
    pub series: TimeSeries,
    pub spectrum: Spectrum,
    pub peaks: Vec<Peak>,
    pub pair: PeakPair,
}

/// Sample the model backwards from `reference`, transform the altitudes and
/// pick out the spectral peaks.
pub fn run_tick(
    source: &dyn ModelSource,
    config: &PipelineConfig,
    reference: DateTime<Utc>,
    tick: u64,
) -> Result<TickReport, PipelineError> {
    let step =
        Duration::from_std(config.step).map_err(|e| PipelineError::InvalidStep(e.to_string()))?;

    let model = source.open()?;
    let series = sample_series(model.as_ref(), reference, config.sample_count, step)?;

    let spectrum = analyze(&series.altitudes(), config.magnitude);
    let peaks = find_peaks(&spectrum, config.peak_height);
    let pair = PeakPair::from_peaks(&peaks);

    log::debug!(
        "tick {}: {} samples, {} bins, {} peaks",
        tick,
        series.len(),
        spectrum.len(),
        peaks.len()
    );

    Ok(TickReport {
        tick,
        reference,
        series,
        spectrum,
        peaks,
        pair,
    })
}
