//! Momentum scoring and signal classification.
//!
//! momentum = (last - ref) / ref + noise
//! where `ref` is the close `lookback` points from the end (index
//! `len - lookback`) and `noise` is a centered uniform draw scaled by
//! `noise`. Classification uses strict inequalities on both sides.

use serde::{Deserialize, Serialize};

use crate::domain::{Series, Signal, SignalKind};
use crate::error::{ensure_finite, ensure_price, EngineError};
use crate::rng::RandomSource;

const COMPONENT: &str = "signal";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    /// Reference point offset from the end of the series (default 20).
    pub lookback: usize,
    /// Scale of the centered noise added to momentum (default 0.1).
    pub noise: f64,
    /// Momentum above `threshold` is bullish, below `-threshold` bearish.
    pub threshold: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            lookback: 20,
            noise: 0.1,
            threshold: 0.02,
        }
    }
}

impl SignalParams {
    /// Shortest series [`score`] accepts.
    pub fn min_len(&self) -> usize {
        self.lookback + 1
    }
}

/// Score `series` and classify the result.
pub fn score(
    series: &Series,
    params: &SignalParams,
    rng: &mut dyn RandomSource,
) -> Result<Signal, EngineError> {
    if params.lookback == 0 {
        return Err(EngineError::precondition(COMPONENT, "lookback must be >= 1"));
    }
    let n = series.len();
    if n < params.min_len() {
        return Err(EngineError::precondition(
            COMPONENT,
            format!("need at least {} points, got {n}", params.min_len()),
        ));
    }

    let points = series.points();
    let last = points[n - 1].close;
    let reference = ensure_price(COMPONENT, "reference close", points[n - params.lookback].close)?;

    let momentum = (last - reference) / reference + rng.centered() * params.noise;
    let momentum = ensure_finite(COMPONENT, "momentum", momentum)?;

    Ok(Signal {
        kind: classify(momentum, params.threshold),
        momentum,
    })
}

/// Map a momentum score to a signal. Exactly `±threshold` is neutral.
pub fn classify(momentum: f64, threshold: f64) -> SignalKind {
    if momentum > threshold {
        SignalKind::Bullish
    } else if momentum < -threshold {
        SignalKind::Bearish
    } else {
        SignalKind::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use chrono::NaiveDate;

    fn series_ending(reference: f64, last: f64) -> Series {
        // 21 points: index 1 is `len - 20`, index 20 is last.
        let mut closes = vec![100.0; 21];
        closes[1] = reference;
        closes[20] = last;
        Series::from_closes(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &closes)
    }

    fn no_noise() -> ScriptedSource {
        ScriptedSource::constant(0.5)
    }

    #[test]
    fn boundaries_are_neutral() {
        let p = SignalParams::default();

        let up = score(&series_ending(100.0, 102.0), &p, &mut no_noise()).unwrap();
        assert_eq!(up.momentum, 0.02);
        assert_eq!(up.kind, SignalKind::Neutral);

        let down = score(&series_ending(100.0, 98.0), &p, &mut no_noise()).unwrap();
        assert_eq!(down.momentum, -0.02);
        assert_eq!(down.kind, SignalKind::Neutral);
    }

    #[test]
    fn beyond_threshold_classifies() {
        let p = SignalParams::default();

        let up = score(&series_ending(100.0, 103.0), &p, &mut no_noise()).unwrap();
        assert_eq!(up.kind, SignalKind::Bullish);

        let down = score(&series_ending(100.0, 97.0), &p, &mut no_noise()).unwrap();
        assert_eq!(down.kind, SignalKind::Bearish);
    }

    #[test]
    fn noise_can_flip_classification() {
        // flat price, noise draw 0.9 -> +0.04
        let p = SignalParams::default();
        let sig = score(&series_ending(100.0, 100.0), &p, &mut ScriptedSource::constant(0.9)).unwrap();
        assert!((sig.momentum - 0.04).abs() < 1e-12);
        assert_eq!(sig.kind, SignalKind::Bullish);
    }

    #[test]
    fn uses_point_lookback_from_end() {
        // Only index 1 differs; index 0 must be ignored.
        let mut closes = vec![100.0; 21];
        closes[0] = 1.0;
        closes[1] = 50.0;
        let series = Series::from_closes(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &closes);
        let sig = score(&series, &SignalParams::default(), &mut no_noise()).unwrap();
        assert_eq!(sig.momentum, 1.0);
    }

    #[test]
    fn short_series_is_precondition() {
        let series = Series::from_closes(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &[100.0; 20]);
        let err = score(&series, &SignalParams::default(), &mut no_noise()).unwrap_err();
        assert!(err.is_precondition());
        assert!(err.to_string().contains("need at least 21 points, got 20"));
    }

    #[test]
    fn zero_reference_is_anomaly() {
        let err = score(&series_ending(0.0, 100.0), &SignalParams::default(), &mut no_noise())
            .unwrap_err();
        assert!(err.is_anomaly());
    }

    #[test]
    fn classify_thresholds() {
        assert_eq!(classify(0.0200001, 0.02), SignalKind::Bullish);
        assert_eq!(classify(0.02, 0.02), SignalKind::Neutral);
        assert_eq!(classify(-0.02, 0.02), SignalKind::Neutral);
        assert_eq!(classify(-0.0200001, 0.02), SignalKind::Bearish);
    }
}
