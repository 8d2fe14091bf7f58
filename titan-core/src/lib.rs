//! Titan Core — stochastic series synthesis, signal scoring, risk, and Monte Carlo.
//!
//! This crate contains the numerical engine:
//! - Random sources (seeded, scripted) and the BLAKE3 seed hierarchy
//! - Historical series synthesis with a reflexivity indicator
//! - Momentum scoring into a BULLISH / NEUTRAL / BEARISH signal
//! - Nearest-rank historical VaR
//! - GBM forward paths with an Irwin-Hall shock
//! - A decorative frequency/amplitude spectrum
//!
//! Every component is stateless apart from the draws it takes from the
//! injected [`rng::RandomSource`]. Nothing here performs I/O.

pub mod domain;
pub mod error;
pub mod paths;
pub mod risk;
pub mod rng;
pub mod series;
pub mod signal;
pub mod spectrum;

pub use domain::{
    Ensemble, Path, PathPoint, PricePoint, RiskEstimate, Series, Signal, SignalKind,
    SpectrumPoint,
};
pub use error::EngineError;
pub use paths::PathParams;
pub use risk::RiskParams;
pub use rng::{RandomSource, ScriptedSource, SeedHierarchy, SeededSource};
pub use series::SeriesParams;
pub use signal::SignalParams;
pub use spectrum::SpectrumParams;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a run produces can cross to the TUI
    /// worker thread and back.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Series>();
        require_sync::<Series>();
        require_send::<Signal>();
        require_sync::<Signal>();
        require_send::<RiskEstimate>();
        require_sync::<RiskEstimate>();
        require_send::<Ensemble>();
        require_sync::<Ensemble>();
        require_send::<SpectrumPoint>();
        require_sync::<SpectrumPoint>();
        require_send::<EngineError>();
        require_sync::<EngineError>();

        require_send::<SeededSource>();
        require_sync::<SeededSource>();
        require_send::<SeedHierarchy>();
        require_sync::<SeedHierarchy>();
    }

    /// Architecture contract: components take randomness as a trait object,
    /// so tests and the runner can inject any source.
    #[test]
    fn components_accept_dyn_random_source() {
        let mut src: Box<dyn RandomSource> = Box::new(ScriptedSource::constant(0.5));
        let spectrum = spectrum::synthesize(&SpectrumParams::default(), src.as_mut()).unwrap();
        assert_eq!(spectrum.len(), 30);
    }
}
