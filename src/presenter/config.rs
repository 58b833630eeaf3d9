use serde::Deserialize;
use strum_macros::Display;

pub const DEFAULT_TITLE: &str = "watch Terra satellite";
pub const DEFAULT_FREQUENCY_RANGE: [f64; 2] = [0.0, 0.1];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colours applied to the chart layout.
pub struct Palette {
    pub paper: &'static str,
    pub plot: &'static str,
    pub font: &'static str,
    pub grid: &'static str,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                paper: "rgb(17,17,17)",
                plot: "rgb(17,17,17)",
                font: "#f2f5fa",
                grid: "#283442",
            },
            Theme::Light => Palette {
                paper: "white",
                plot: "#E5ECF6",
                font: "#2a3f5f",
                grid: "white",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PresenterConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub theme: Theme,
    /// Visible x range of the spectrum panel, cycles per sample
    #[serde(default = "default_frequency_range")]
    pub frequency_range: [f64; 2],
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            theme: Theme::default(),
            frequency_range: DEFAULT_FREQUENCY_RANGE,
        }
    }
}

impl PresenterConfig {
    pub fn validate(&self) -> Result<(), String> {
        let [low, high] = self.frequency_range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(format!(
                "presenter.frequency_range must be increasing, got [{low}, {high}]"
            ));
        }
        Ok(())
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_frequency_range() -> [f64; 2] {
    DEFAULT_FREQUENCY_RANGE
}
