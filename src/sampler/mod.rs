mod sample;
mod series;

pub use sample::{Sample, TimeSeries};
pub use series::sample_series;
