use chrono::{DateTime, Duration, Utc};

use crate::predict::{PositionModel, PredictError};
use crate::sampler::sample::{Sample, TimeSeries};

/// Query the model at `reference - i * step` for `i in 0..count`.
///
/// Fails with `TimeOutOfRange` when a sample instant falls outside what
/// `chrono` can represent.
pub fn sample_series(
    model: &dyn PositionModel,
    reference: DateTime<Utc>,
    count: usize,
    step: Duration,
) -> Result<TimeSeries, PredictError> {
    let mut samples = Vec::with_capacity(count);
    let mut cursor = reference;

    for i in 0..count {
        if i > 0 {
            cursor = cursor.checked_sub_signed(step).ok_or_else(|| {
                PredictError::TimeOutOfRange(format!(
                    "{} steps of {}s before {}",
                    i,
                    step.num_seconds(),
                    reference
                ))
            })?;
        }
        let position = model.position(cursor)?;
        samples.push(Sample::new(cursor, position));
    }

    Ok(TimeSeries { samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ConstantAltitude, FailingAfter, LinearAltitude};
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn produces_count_samples_spaced_by_step() {
        let model = LinearAltitude::new(reference());
        for (count, step) in [(360, 100), (1, 100), (7, 1), (50, 3600)] {
            let series =
                sample_series(&model, reference(), count, Duration::seconds(step)).unwrap();
            assert_eq!(series.len(), count);
            assert_eq!(series.samples[0].timestamp, reference());
            for pair in series.samples.windows(2) {
                assert_eq!(pair[0].timestamp - pair[1].timestamp, Duration::seconds(step));
            }
        }
    }

    #[test]
    fn most_recent_sample_first() {
        let model = LinearAltitude::new(reference());
        let series = sample_series(&model, reference(), 4, Duration::seconds(100)).unwrap();
        assert_eq!(series.altitudes(), vec![0.0, -100.0, -200.0, -300.0]);
        assert_eq!(series.latest().unwrap().timestamp, reference());
    }

    #[test]
    fn zero_count_is_empty() {
        let model = LinearAltitude::new(reference());
        let series = sample_series(&model, reference(), 0, Duration::seconds(100)).unwrap();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
    }

    #[test]
    fn model_failure_aborts_series() {
        let model = FailingAfter::new(3);
        let result = sample_series(&model, reference(), 10, Duration::seconds(100));
        assert!(matches!(result, Err(PredictError::Propagation(_))));
    }

    #[test]
    fn step_beyond_calendar_range_is_an_error() {
        let step = Duration::days(365 * 1_000_000);
        let result = sample_series(&ConstantAltitude(700.0), reference(), 2, step);
        assert!(matches!(result, Err(PredictError::TimeOutOfRange(_))));

        let single = sample_series(&ConstantAltitude(700.0), reference(), 1, step).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn thousand_year_step_fails_once_the_calendar_runs_out() {
        let step = Duration::days(365 * 1000);
        let result = sample_series(&ConstantAltitude(700.0), reference(), 360, step);
        assert!(matches!(result, Err(PredictError::TimeOutOfRange(_))));
    }
}
