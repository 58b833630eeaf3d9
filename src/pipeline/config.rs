use serde::Deserialize;
use std::time::Duration;

use crate::spectrum::MagnitudeMode;

pub const DEFAULT_SAMPLE_COUNT: usize = 360;
pub const DEFAULT_STEP: Duration = Duration::from_secs(100);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_PEAK_HEIGHT: f64 = 200.0;
/// Longest history a tick may reach back over, `(sample_count - 1) * step`.
pub const MAX_SAMPLED_SPAN: Duration = Duration::from_secs(100 * 365 * 86_400);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Spacing between consecutive samples
    #[serde(default = "default_step", deserialize_with = "deserialize_duration")]
    pub step: Duration,
    /// Time between ticks
    #[serde(default = "default_interval", deserialize_with = "deserialize_duration")]
    pub interval: Duration,
    #[serde(default = "default_peak_height")]
    pub peak_height: f64,
    #[serde(default)]
    pub magnitude: MagnitudeMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            step: DEFAULT_STEP,
            interval: DEFAULT_INTERVAL,
            peak_height: DEFAULT_PEAK_HEIGHT,
            magnitude: MagnitudeMode::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_count == 0 {
            return Err("pipeline.sample_count must be at least 1".into());
        }
        if self.step.is_zero() {
            return Err("pipeline.step must be positive".into());
        }
        let span = u32::try_from(self.sample_count - 1)
            .ok()
            .and_then(|n| self.step.checked_mul(n));
        if !span.is_some_and(|span| span <= MAX_SAMPLED_SPAN) {
            return Err(format!(
                "pipeline.sample_count * pipeline.step must not exceed {}",
                humantime::format_duration(MAX_SAMPLED_SPAN)
            ));
        }
        if self.interval.is_zero() {
            return Err("pipeline.interval must be positive".into());
        }
        if !self.peak_height.is_finite() {
            return Err("pipeline.peak_height must be finite".into());
        }
        Ok(())
    }
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_step() -> Duration {
    DEFAULT_STEP
}

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

fn default_peak_height() -> f64 {
    DEFAULT_PEAK_HEIGHT
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let config: PipelineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_humantime_durations() {
        let config: PipelineConfig = serde_yaml::from_str(
            "sample_count: 120\nstep: 1m 30s\ninterval: 500ms\nmagnitude: modulus\n",
        )
        .unwrap();
        assert_eq!(config.sample_count, 120);
        assert_eq!(config.step, Duration::from_secs(90));
        assert_eq!(config.interval, Duration::from_millis(500));
        assert_eq!(config.magnitude, MagnitudeMode::Modulus);
    }

    #[test]
    fn rejects_bad_duration() {
        let result: Result<PipelineConfig, _> = serde_yaml::from_str("step: soon\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_values() {
        let zero_count = PipelineConfig {
            sample_count: 0,
            ..Default::default()
        };
        assert!(zero_count.validate().is_err());

        let zero_interval = PipelineConfig {
            interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero_interval.validate().is_err());
    }

    #[test]
    fn validation_bounds_sampled_span() {
        let ancient = PipelineConfig {
            step: humantime::parse_duration("1000years").unwrap(),
            ..Default::default()
        };
        assert!(ancient.validate().is_err());

        let at_limit = PipelineConfig {
            sample_count: 101,
            step: MAX_SAMPLED_SPAN / 100,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let past_limit = PipelineConfig {
            sample_count: 102,
            ..at_limit.clone()
        };
        assert!(past_limit.validate().is_err());

        let single = PipelineConfig {
            sample_count: 1,
            step: humantime::parse_duration("1000years").unwrap(),
            ..Default::default()
        };
        assert!(single.validate().is_ok());
    }
}
