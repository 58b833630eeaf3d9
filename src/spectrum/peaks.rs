use serde::Serialize;
use utoipa::ToSchema;

use crate::spectrum::fft::Spectrum;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Peak {
    pub index: usize,
    /// Cycles per sample
    pub frequency: f64,
    pub magnitude: f64,
}

/// Indices of local maxima in `values`.
///
/// A maximum must be strictly greater than its left neighbour and strictly
/// greater than the first differing value on its right. Flat tops are
/// reported at their middle index, rounded down. The first and last
/// elements never qualify.
pub fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if values.len() < 3 {
        return maxima;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                let right = ahead - 1;
                maxima.push((i + right) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    maxima
}

/// Local maxima of the spectrum with `magnitude >= height`, in ascending index order.
pub fn find_peaks(spectrum: &Spectrum, height: f64) -> Vec<Peak> {
    local_maxima(&spectrum.magnitudes)
        .into_iter()
        .filter(|&i| spectrum.magnitudes[i] >= height)
        .map(|i| Peak {
            index: i,
            frequency: spectrum.frequencies[i],
            magnitude: spectrum.magnitudes[i],
        })
        .collect()
}

/// At most two peaks for display: the two strongest, lower frequency first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct PeakPair {
    pub first: Option<Peak>,
    pub second: Option<Peak>,
}

impl PeakPair {
    pub fn from_peaks(peaks: &[Peak]) -> Self {
        let mut strongest: Vec<Peak> = peaks.to_vec();
        strongest.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude).then(a.index.cmp(&b.index)));
        strongest.truncate(2);
        strongest.sort_by_key(|p| p.index);

        if peaks.len() > 2 {
            log::debug!(
                "{} spectral peaks found, displaying the strongest two",
                peaks.len()
            );
        }

        let mut slots = strongest.into_iter();
        Self {
            first: slots.next(),
            second: slots.next(),
        }
    }

    /// Number of filled slots.
    pub fn count(&self) -> usize {
        self.first.iter().chain(self.second.iter()).count()
    }
}
