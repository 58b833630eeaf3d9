mod fft;
mod peaks;

pub use fft::{analyze, MagnitudeMode, Spectrum};
pub use peaks::{find_peaks, Peak, PeakPair};
