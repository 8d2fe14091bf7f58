//! Monte Carlo forward paths under geometric Brownian motion.
//!
//! Each step applies
//!
//! ```text
//! ret   = (drift - volatility^2 / 2) * dt + volatility * sqrt(dt) * shock
//! price = price * exp(ret)
//! ```
//!
//! where `shock` is the Irwin-Hall approximation `(sum of 6 uniforms - 3) / sqrt(0.5)`.
//! The approximation is reproduced exactly rather than swapped for an exact
//! Gaussian sampler; its variance and tails differ slightly from N(0, 1).

use serde::{Deserialize, Serialize};

use crate::domain::{Ensemble, Path, PathPoint};
use crate::error::{ensure_price, EngineError};
use crate::rng::RandomSource;

const COMPONENT: &str = "paths";

/// Uniform draws summed per shock.
pub const SHOCK_DRAWS: usize = 6;

/// Upper bound on steps per path.
pub const MAX_DAYS: usize = 10_000;
/// Upper bound on paths per ensemble.
pub const MAX_SIMS: usize = 100_000;
/// Upper bound on `sims * (days + 1)`, the points held by one ensemble.
pub const MAX_POINTS: usize = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathParams {
    /// Steps per path (default 10). Zero yields anchor-only paths.
    pub days: usize,
    /// Paths per ensemble (default 50).
    pub sims: usize,
    /// Step length in years (default 1/252).
    pub dt: f64,
    /// Annualized volatility (default 0.35).
    pub volatility: f64,
    /// Annualized drift (default 0.05).
    pub drift: f64,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            days: 10,
            sims: 50,
            dt: 1.0 / 252.0,
            volatility: 0.35,
            drift: 0.05,
        }
    }
}

impl PathParams {
    /// Check everything but the start price.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sims == 0 {
            return Err(EngineError::precondition(COMPONENT, "sims must be >= 1"));
        }
        if self.sims > MAX_SIMS {
            return Err(EngineError::precondition(
                COMPONENT,
                format!("sims must be <= {MAX_SIMS}, got {}", self.sims),
            ));
        }
        if self.days > MAX_DAYS {
            return Err(EngineError::precondition(
                COMPONENT,
                format!("days must be <= {MAX_DAYS}, got {}", self.days),
            ));
        }
        let points = self.sims.saturating_mul(self.days + 1);
        if points > MAX_POINTS {
            return Err(EngineError::precondition(
                COMPONENT,
                format!(
                    "sims x (days + 1) = {points} exceeds the ensemble limit of {MAX_POINTS} points"
                ),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(EngineError::precondition(
                COMPONENT,
                format!("dt must be finite and > 0, got {}", self.dt),
            ));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(EngineError::precondition(
                COMPONENT,
                format!("volatility must be finite and >= 0, got {}", self.volatility),
            ));
        }
        if !self.drift.is_finite() {
            return Err(EngineError::precondition(COMPONENT, "drift must be finite"));
        }
        Ok(())
    }
}

/// Irwin-Hall shock: six uniforms, recentered and rescaled.
pub fn irwin_hall_shock(rng: &mut dyn RandomSource) -> f64 {
    let sum: f64 = (0..SHOCK_DRAWS).map(|_| rng.uniform()).sum();
    (sum - 3.0) / 0.5f64.sqrt()
}

/// Simulate one path of `params.days` steps from `start_price`.
pub fn simulate_path(
    start_price: f64,
    params: &PathParams,
    rng: &mut dyn RandomSource,
) -> Result<Path, EngineError> {
    let drift_term = (params.drift - 0.5 * params.volatility * params.volatility) * params.dt;
    let diffusion = params.volatility * params.dt.sqrt();

    let mut price = start_price;
    let mut points = Vec::with_capacity(params.days + 1);
    points.push(PathPoint { step: 0, price });

    for step in 1..=params.days {
        let shock = irwin_hall_shock(rng);
        price *= (drift_term + diffusion * shock).exp();
        ensure_price(COMPONENT, &format!("price on step {step}"), price)?;
        points.push(PathPoint { step, price });
    }

    Ok(Path::new(points))
}

/// Simulate `params.sims` paths sequentially from a single source.
///
/// For a fixed draw sequence the ensemble is reproducible.
pub fn simulate(
    start_price: f64,
    params: &PathParams,
    rng: &mut dyn RandomSource,
) -> Result<Ensemble, EngineError> {
    check_start(start_price)?;
    params.validate()?;

    let paths = (0..params.sims)
        .map(|_| simulate_path(start_price, params, rng))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Ensemble {
        start_price,
        days: params.days,
        paths,
    })
}

/// Fail with `PreconditionViolation` unless `start_price` is finite and positive.
pub fn check_start(start_price: f64) -> Result<(), EngineError> {
    if start_price.is_finite() && start_price > 0.0 {
        Ok(())
    } else {
        Err(EngineError::precondition(
            COMPONENT,
            format!("start price must be finite and > 0, got {start_price}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, SeededSource};

    fn params(days: usize, sims: usize) -> PathParams {
        PathParams {
            days,
            sims,
            ..PathParams::default()
        }
    }

    #[test]
    fn zero_days_gives_anchor_only_paths() {
        let mut rng = SeededSource::from_seed(3);
        let ensemble = simulate(100.0, &params(0, 5), &mut rng).unwrap();

        assert_eq!(ensemble.len(), 5);
        for path in &ensemble.paths {
            assert_eq!(path.points(), &[PathPoint { step: 0, price: 100.0 }]);
        }
    }

    #[test]
    fn path_shape() {
        let mut rng = SeededSource::from_seed(3);
        let ensemble = simulate(250.0, &params(10, 50), &mut rng).unwrap();

        assert_eq!(ensemble.len(), 50);
        for path in &ensemble.paths {
            assert_eq!(path.len(), 11);
            assert_eq!(path.start_price(), Some(250.0));
            for (i, pt) in path.points().iter().enumerate() {
                assert_eq!(pt.step, i);
                assert!(pt.price > 0.0);
            }
        }
    }

    #[test]
    fn mid_draws_give_zero_shock() {
        let mut rng = ScriptedSource::constant(0.5);
        assert_eq!(irwin_hall_shock(&mut rng), 0.0);
        assert_eq!(rng.consumed(), SHOCK_DRAWS);
    }

    #[test]
    fn zero_shock_step_applies_drift_only() {
        let p = params(1, 1);
        let path = simulate_path(100.0, &p, &mut ScriptedSource::constant(0.5)).unwrap();
        let expected = 100.0 * ((0.05_f64 - 0.5 * 0.35 * 0.35) / 252.0).exp();
        assert!((path.terminal_price().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn seeded_simulation_is_reproducible() {
        let a = simulate(100.0, &params(10, 20), &mut SeededSource::from_seed(11)).unwrap();
        let b = simulate(100.0, &params(10, 20), &mut SeededSource::from_seed(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_sims_is_precondition() {
        let err = simulate(100.0, &params(10, 0), &mut SeededSource::from_seed(1)).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn oversized_ensembles_are_precondition() {
        let mut rng = ScriptedSource::constant(0.5);
        for p in [
            params(MAX_DAYS + 1, 1),
            params(1, MAX_SIMS + 1),
            params(MAX_DAYS, MAX_SIMS),
            params(usize::MAX, usize::MAX),
        ] {
            let err = simulate(100.0, &p, &mut rng).unwrap_err();
            assert!(err.is_precondition(), "{p:?}");
        }
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn bad_start_price_is_precondition() {
        for start in [0.0, -5.0, f64::NAN] {
            let err = simulate(start, &params(10, 1), &mut SeededSource::from_seed(1)).unwrap_err();
            assert!(err.is_precondition());
        }
    }

    #[test]
    fn overflow_is_numeric_anomaly() {
        let p = PathParams {
            days: 5,
            sims: 1,
            volatility: 0.0,
            drift: 1e6,
            dt: 1.0,
        };
        let err = simulate(100.0, &p, &mut ScriptedSource::constant(0.5)).unwrap_err();
        assert!(err.is_anomaly());
    }
}
