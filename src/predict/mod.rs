mod error;
mod orbital;
mod propagation;
mod tle_loader;
mod types;

pub use error::PredictError;
pub use orbital::{ModelSource, PositionModel};
pub use tle_loader::TleCatalog;
pub use types::GeoPosition;

#[cfg(test)]
pub(crate) use orbital::tests::terra;
