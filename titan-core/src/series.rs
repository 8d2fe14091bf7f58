//! Historical series synthesis.
//!
//! Produces a daily close series as a multiplicative random walk whose step
//! size scales with the current price. Each point also carries a reflexivity
//! score computed against a *synthetic* moving average: the "MA20" here is
//! the current price perturbed by noise, not a rolling mean.
//!
//! Per step, draws are consumed in this order: price change, volume,
//! moving-average noise.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PricePoint, Series};
use crate::error::{ensure_finite, ensure_price, EngineError};
use crate::rng::RandomSource;

const COMPONENT: &str = "series";

/// Upper bound on `days`; longer histories are refused before allocating.
pub const MAX_DAYS: usize = 100_000;

/// Parameters for [`synthesize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesParams {
    /// Number of daily points (default 100).
    pub days: usize,
    /// Per-step volatility applied to the centered shock (default 0.02).
    pub volatility: f64,
    /// Starting price is drawn uniformly from `[start_low, start_high)`.
    pub start_low: f64,
    pub start_high: f64,
    /// Relative noise of the synthetic moving average (default 0.05).
    pub ma_noise: f64,
    /// Volume is drawn as an integer in `[volume_min, volume_min + volume_span)`.
    pub volume_min: u64,
    pub volume_span: u64,
    /// Volume that maps to a reflexivity weight of 1.0.
    pub volume_scale: f64,
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self {
            days: 100,
            volatility: 0.02,
            start_low: 100.0,
            start_high: 150.0,
            ma_noise: 0.05,
            volume_min: 1_000_000,
            volume_span: 5_000_000,
            volume_scale: 2_500_000.0,
        }
    }
}

/// Synthesize a series whose last point is dated yesterday (UTC).
pub fn synthesize(params: &SeriesParams, rng: &mut dyn RandomSource) -> Result<Series, EngineError> {
    synthesize_until(params, Utc::now().date_naive(), rng)
}

/// Synthesize a series dated relative to `today`: point `i` lands on
/// `today - (days - i)`.
pub fn synthesize_until(
    params: &SeriesParams,
    today: NaiveDate,
    rng: &mut dyn RandomSource,
) -> Result<Series, EngineError> {
    let days = params.days;
    if days == 0 {
        return Err(EngineError::precondition(COMPONENT, "days must be >= 1"));
    }
    if days > MAX_DAYS {
        return Err(EngineError::precondition(
            COMPONENT,
            format!("days must be <= {MAX_DAYS}, got {days}"),
        ));
    }
    let first_date = today.checked_sub_days(Days::new(days as u64)).ok_or_else(|| {
        EngineError::precondition(
            COMPONENT,
            format!("{days} days before {today} is outside the supported date range"),
        )
    })?;
    if !(params.start_low > 0.0 && params.start_high >= params.start_low) {
        return Err(EngineError::precondition(
            COMPONENT,
            format!(
                "start range [{}, {}) must be positive and ordered",
                params.start_low, params.start_high
            ),
        ));
    }
    if params.volume_scale <= 0.0 {
        return Err(EngineError::precondition(COMPONENT, "volume_scale must be > 0"));
    }

    let mut price = rng.uniform_range(params.start_low, params.start_high);
    let mut points = Vec::with_capacity(days);

    for i in 0..days {
        let change = rng.centered() * params.volatility * price;
        price += change;
        ensure_price(COMPONENT, &format!("close on step {i}"), price)?;

        let volume = (rng.uniform() * params.volume_span as f64).floor() as u64 + params.volume_min;
        let ma20 = price * (1.0 + rng.centered() * params.ma_noise);
        let reflexivity = ((price - ma20) / ma20) * (volume as f64 / params.volume_scale);
        ensure_finite(COMPONENT, &format!("reflexivity on step {i}"), reflexivity)?;

        points.push(PricePoint {
            date: first_date + Days::new(i as u64),
            close: price,
            reflexivity,
        });
    }

    Ok(Series::new(points))
}
