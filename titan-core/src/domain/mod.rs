//! Domain types produced by the engine.
//!
//! Everything here is created fresh for one analysis run and owned by it.

pub mod path;
pub mod price;
pub mod risk;
pub mod signal;
pub mod spectrum;

pub use path::{Ensemble, Path, PathPoint};
pub use price::{PricePoint, Series};
pub use risk::RiskEstimate;
pub use signal::{Signal, SignalKind};
pub use spectrum::SpectrumPoint;
