//! Decorative frequency/amplitude spectrum.
//!
//! This is NOT a spectral estimate of anything. Bin `i` (0-based) gets
//!
//! ```text
//! frequency = i + 1
//! amplitude = |sin(0.5 * i)| * U(0, 10) + (bins - i) * 0.5
//! ```
//!
//! which gives a noisy, downward-sloping, waveform-like bar chart.

use serde::{Deserialize, Serialize};

use crate::domain::SpectrumPoint;
use crate::error::EngineError;
use crate::rng::RandomSource;

const COMPONENT: &str = "spectrum";

/// Upper bound on `bins`.
pub const MAX_BINS: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumParams {
    /// Number of bins (default 30).
    pub bins: u32,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self { bins: 30 }
    }
}

pub fn synthesize(
    params: &SpectrumParams,
    rng: &mut dyn RandomSource,
) -> Result<Vec<SpectrumPoint>, EngineError> {
    if params.bins == 0 {
        return Err(EngineError::precondition(COMPONENT, "bins must be >= 1"));
    }
    if params.bins > MAX_BINS {
        return Err(EngineError::precondition(
            COMPONENT,
            format!("bins must be <= {MAX_BINS}, got {}", params.bins),
        ));
    }
    let bins = params.bins;
    Ok((0..bins)
        .map(|i| {
            let phase = (f64::from(i) * 0.5).sin().abs();
            SpectrumPoint {
                frequency: i + 1,
                amplitude: phase * rng.uniform() * 10.0 + f64::from(bins - i) * 0.5,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, SeededSource};

    #[test]
    fn thirty_bins_increasing_frequency() {
        let spectrum = synthesize(&SpectrumParams::default(), &mut SeededSource::from_seed(5)).unwrap();

        assert_eq!(spectrum.len(), 30);
        for (i, pt) in spectrum.iter().enumerate() {
            assert_eq!(pt.frequency, i as u32 + 1);
            assert!(pt.amplitude >= 0.0);
        }
    }

    #[test]
    fn zero_draws_leave_the_linear_floor() {
        let spectrum = synthesize(&SpectrumParams::default(), &mut ScriptedSource::constant(0.0)).unwrap();
        assert_eq!(spectrum[0].amplitude, 15.0);
        assert_eq!(spectrum[29].amplitude, 0.5);
    }

    #[test]
    fn first_bin_has_no_random_component() {
        // sin(0) = 0, so bin 0 is always 30 * 0.5
        let spectrum = synthesize(&SpectrumParams::default(), &mut ScriptedSource::constant(0.99)).unwrap();
        assert_eq!(spectrum[0].amplitude, 15.0);
        let expected = (0.5f64).sin().abs() * 0.99 * 10.0 + 29.0 * 0.5;
        assert!((spectrum[1].amplitude - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_bins_is_precondition() {
        let err = synthesize(&SpectrumParams { bins: 0 }, &mut ScriptedSource::constant(0.0)).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn oversized_bins_is_precondition() {
        let mut rng = ScriptedSource::constant(0.0);
        let err = synthesize(&SpectrumParams { bins: 65_536 }, &mut rng).unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(rng.consumed(), 0);

        let max = synthesize(&SpectrumParams { bins: MAX_BINS }, &mut rng).unwrap();
        assert_eq!(max.len(), MAX_BINS as usize);
    }
}
