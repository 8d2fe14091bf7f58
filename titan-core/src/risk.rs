//! Historical Value-at-Risk.
//!
//! VaR is the magnitude of the empirical lower-tail log return at the
//! configured confidence, using the nearest-rank method with no
//! interpolation: `|sorted[floor((1 - confidence) * n)]|`.
//!
//! The Kelly fraction reported alongside is a randomized placeholder in
//! `[kelly_base, kelly_base + kelly_spread)`, not derived from the returns.

use serde::{Deserialize, Serialize};

use crate::domain::{RiskEstimate, Series};
use crate::error::{ensure_finite, ensure_price, EngineError};
use crate::rng::RandomSource;

const COMPONENT: &str = "risk";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParams {
    /// VaR confidence level (default 0.95).
    pub confidence: f64,
    pub kelly_base: f64,
    pub kelly_spread: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            kelly_base: 0.15,
            kelly_spread: 0.1,
        }
    }
}

/// Estimate VaR for `capital` from the series' one-step log returns.
pub fn estimate(
    series: &Series,
    capital: f64,
    params: &RiskParams,
    rng: &mut dyn RandomSource,
) -> Result<RiskEstimate, EngineError> {
    if !capital.is_finite() {
        return Err(EngineError::precondition(
            COMPONENT,
            format!("capital must be finite, got {capital}"),
        ));
    }
    if series.len() < 2 {
        return Err(EngineError::precondition(
            COMPONENT,
            format!("need at least 2 points, got {}", series.len()),
        ));
    }

    let returns = log_returns(series)?;
    let var_pct = var_from_returns(&returns, params.confidence)?;
    let kelly = params.kelly_base + rng.uniform() * params.kelly_spread;

    Ok(RiskEstimate {
        var_pct,
        var_cash: var_pct * capital,
        kelly,
    })
}

/// One-step log returns `ln(close[i] / close[i-1])`, in series order.
pub fn log_returns(series: &Series) -> Result<Vec<f64>, EngineError> {
    let points = series.points();
    let mut returns = Vec::with_capacity(points.len().saturating_sub(1));
    for (i, w) in points.windows(2).enumerate() {
        let prev = ensure_price(COMPONENT, &format!("close at index {i}"), w[0].close)?;
        let curr = ensure_price(COMPONENT, &format!("close at index {}", i + 1), w[1].close)?;
        returns.push((curr / prev).ln());
    }
    Ok(returns)
}

/// Nearest-rank VaR magnitude of `returns` at `confidence`.
///
/// `returns` need not be sorted.
pub fn var_from_returns(returns: &[f64], confidence: f64) -> Result<f64, EngineError> {
    if returns.is_empty() {
        return Err(EngineError::precondition(COMPONENT, "no returns to rank"));
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(EngineError::precondition(
            COMPONENT,
            format!("confidence must lie in (0, 1), got {confidence}"),
        ));
    }
    for (i, r) in returns.iter().enumerate() {
        ensure_finite(COMPONENT, &format!("return {i}"), *r)?;
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = tail_rank(sorted.len(), 1.0 - confidence);
    Ok(sorted[rank].abs())
}

/// `floor(tail * n)`, clamped into the index range.
///
/// `tail * n` is rounded to 9 decimals first so 0.05 computed as
/// `1.0 - 0.95` still lands on the intended rank.
pub(crate) fn tail_rank(n: usize, tail: f64) -> usize {
    let raw = ((tail * n as f64) * 1e9).round() / 1e9;
    (raw.floor() as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn hand_computed_var() {
        let returns = [-0.05, -0.03, -0.01, 0.0, 0.02, 0.04, 0.06, 0.08, 0.10, 0.12];
        assert_eq!(var_from_returns(&returns, 0.95).unwrap(), 0.05);
    }

    #[test]
    fn unsorted_input_is_ranked() {
        let returns = [0.12, -0.01, 0.10, -0.05, 0.0, 0.02, -0.03, 0.04, 0.06, 0.08];
        assert_eq!(var_from_returns(&returns, 0.95).unwrap(), 0.05);
    }

    #[test]
    fn rank_uses_floor_of_tail_count() {
        // n = 40: floor(0.05 * 40) = 2 -> third smallest
        let returns: Vec<f64> = (0..40).map(|i| i as f64 * 0.001 - 0.01).collect();
        let var = var_from_returns(&returns, 0.95).unwrap();
        assert!((var - 0.008).abs() < 1e-12);
    }

    #[test]
    fn tail_rank_handles_float_noise() {
        assert_eq!(tail_rank(20, 1.0 - 0.95), 1);
        assert_eq!(tail_rank(100, 1.0 - 0.95), 5);
        assert_eq!(tail_rank(99, 0.05), 4);
        assert_eq!(tail_rank(1, 0.05), 0);
    }

    #[test]
    fn estimate_from_series() {
        // closes chosen so log returns are ln(1.1) and ln(0.9)
        let series = Series::from_closes(start(), &[100.0, 110.0, 99.0]);
        let risk = estimate(&series, 1_000_000.0, &RiskParams::default(), &mut ScriptedSource::constant(0.5))
            .unwrap();

        let expected = (0.9f64).ln().abs();
        assert!((risk.var_pct - expected).abs() < 1e-12);
        assert!((risk.var_cash - expected * 1_000_000.0).abs() < 1e-6);
        assert!((risk.kelly - 0.2).abs() < 1e-12);
    }

    #[test]
    fn single_point_is_precondition() {
        let series = Series::from_closes(start(), &[100.0]);
        let err = estimate(&series, 1_000.0, &RiskParams::default(), &mut ScriptedSource::constant(0.5))
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn non_finite_capital_is_precondition() {
        let series = Series::from_closes(start(), &[100.0, 101.0]);
        for capital in [f64::NAN, f64::INFINITY] {
            let err = estimate(&series, capital, &RiskParams::default(), &mut ScriptedSource::constant(0.5))
                .unwrap_err();
            assert!(err.is_precondition());
        }
    }

    #[test]
    fn non_positive_close_is_anomaly() {
        let series = Series::from_closes(start(), &[100.0, 0.0, 101.0]);
        let err = estimate(&series, 1_000.0, &RiskParams::default(), &mut ScriptedSource::constant(0.5))
            .unwrap_err();
        assert!(err.is_anomaly());
    }

    #[test]
    fn kelly_stays_in_band() {
        let series = Series::from_closes(start(), &[100.0, 101.0]);
        for draw in [0.0, 0.3, 0.999] {
            let risk = estimate(&series, 1.0, &RiskParams::default(), &mut ScriptedSource::constant(draw))
                .unwrap();
            assert!(risk.kelly >= 0.15 && risk.kelly < 0.25);
        }
    }
}
