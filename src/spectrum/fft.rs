use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// Which scalar is taken from each complex FFT bin.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MagnitudeMode {
    /// `|Im(X[k])|`
    #[default]
    Imaginary,
    /// `|X[k]|`
    Modulus,
}

impl MagnitudeMode {
    fn apply(self, bin: &Complex<f64>) -> f64 {
        match self {
            MagnitudeMode::Imaginary => bin.im.abs(),
            MagnitudeMode::Modulus => bin.norm(),
        }
    }
}

/// Non-negative half of a spectrum: `frequencies[k]` pairs with `magnitudes[k]`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Spectrum {
    /// Cycles per sample
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// FFT sample frequencies for a window of `n` samples with unit spacing.
///
/// Positive frequencies come first, then the negative ones:
/// `[0, 1, ..., ceil(n/2) - 1, -floor(n/2), ..., -1] * (1 / n)`.
pub fn fft_frequencies(n: usize) -> Vec<f64> {
    let positive = n.div_ceil(2);
    let spacing = 1.0 / n as f64;
    (0..n)
        .map(|i| {
            let k = if i < positive {
                i as f64
            } else {
                i as f64 - n as f64
            };
            k * spacing
        })
        .collect()
}

/// Transform `signal` and keep the first `floor(n/2)` bins.
///
/// The signal is used in the order given; no window is applied.
pub fn analyze(signal: &[f64], mode: MagnitudeMode) -> Spectrum {
    let n = signal.len();
    if n == 0 {
        return Spectrum {
            frequencies: Vec::new(),
            magnitudes: Vec::new(),
        };
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buffer);

    let half = n / 2;
    let mut frequencies = fft_frequencies(n);
    frequencies.truncate(half);
    let magnitudes = buffer.iter().take(half).map(|c| mode.apply(c)).collect();

    Spectrum {
        frequencies,
        magnitudes,
    }
}
