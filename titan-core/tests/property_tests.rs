//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Series length and strictly increasing dates for any day count
//! 2. Seeded path simulation is reproducible and shaped `sims x (days + 1)`
//! 3. VaR equals the nearest-rank order statistic of the returns
//! 4. Spectrum frequencies run 1..=30 with non-negative amplitudes
//! 5. Classification is monotone in momentum

use chrono::NaiveDate;
use proptest::prelude::*;
use titan_core::{paths, risk, series, signal, spectrum};
use titan_core::{PathParams, SeededSource, SeriesParams, SignalKind, SpectrumParams};

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_returns() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.2..0.2_f64, 1..300)
}

fn arb_start_price() -> impl Strategy<Value = f64> {
    (1.0..10_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

// ── 1. Series shape ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn series_has_requested_length_and_ordered_dates(days in 1usize..400, seed in any::<u64>()) {
        let params = SeriesParams { days, ..SeriesParams::default() };
        let s = series::synthesize_until(&params, anchor(), &mut SeededSource::from_seed(seed)).unwrap();

        prop_assert_eq!(s.len(), days);
        for w in s.points().windows(2) {
            prop_assert!(w[0].date < w[1].date);
        }
        prop_assert!(s.closes().all(|c| c > 0.0));
    }
}

// ── 2. Path determinism ──────────────────────────────────────────────

proptest! {
    #[test]
    fn seeded_simulation_is_reproducible(
        start in arb_start_price(),
        days in 0usize..30,
        sims in 1usize..20,
        seed in any::<u64>(),
    ) {
        let params = PathParams { days, sims, ..PathParams::default() };
        let a = paths::simulate(start, &params, &mut SeededSource::from_seed(seed)).unwrap();
        let b = paths::simulate(start, &params, &mut SeededSource::from_seed(seed)).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), sims);
        for path in &a.paths {
            prop_assert_eq!(path.len(), days + 1);
            prop_assert_eq!(path.start_price(), Some(start));
        }
    }
}

// ── 3. VaR order statistic ───────────────────────────────────────────

proptest! {
    #[test]
    fn var_is_nearest_rank(returns in arb_returns()) {
        let mut sorted = returns.clone();
        sorted.sort_by(f64::total_cmp);
        let idx = (returns.len() as f64 * 0.05).floor() as usize;

        let var = risk::var_from_returns(&returns, 0.95).unwrap();
        prop_assert_eq!(var, sorted[idx].abs());
        prop_assert!(var >= 0.0);
    }
}

// ── 4. Spectrum shape ────────────────────────────────────────────────

proptest! {
    #[test]
    fn spectrum_shape(seed in any::<u64>()) {
        let bins = spectrum::synthesize(&SpectrumParams::default(), &mut SeededSource::from_seed(seed)).unwrap();
        prop_assert_eq!(bins.len(), 30);
        for (i, b) in bins.iter().enumerate() {
            prop_assert_eq!(b.frequency, i as u32 + 1);
            prop_assert!(b.amplitude >= 0.0);
        }
    }
}

// ── 5. Classification monotonicity ───────────────────────────────────

proptest! {
    #[test]
    fn classification_is_monotone(a in -1.0..1.0_f64, b in -1.0..1.0_f64) {
        let rank = |k: SignalKind| match k {
            SignalKind::Bearish => 0,
            SignalKind::Neutral => 1,
            SignalKind::Bullish => 2,
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(signal::classify(lo, 0.02)) <= rank(signal::classify(hi, 0.02)));
    }
}
