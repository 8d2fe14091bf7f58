//! Ensemble summary statistics — terminal price distribution of the paths.
//!
//! Quantiles use the same nearest-rank rule as the VaR estimate:
//! `sorted[floor(q * n)]`, clamped to the last element. All functions are
//! pure: ensemble in, numbers out.

use serde::{Deserialize, Serialize};

use titan_core::Ensemble;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub start_price: f64,
    pub path_count: usize,
    pub mean_terminal: f64,
    pub p05_terminal: f64,
    pub median_terminal: f64,
    pub p95_terminal: f64,
    /// Fraction of paths that end below the start price.
    pub prob_below_start: f64,
}

impl EnsembleSummary {
    /// Summarize an ensemble. `None` when it holds no paths.
    pub fn from_ensemble(ensemble: &Ensemble) -> Option<Self> {
        let mut terminals = ensemble.terminal_prices();
        if terminals.is_empty() {
            return None;
        }
        terminals.sort_by(f64::total_cmp);

        let n = terminals.len();
        let mean = terminals.iter().sum::<f64>() / n as f64;
        let below = terminals.iter().filter(|&&p| p < ensemble.start_price).count();

        Some(Self {
            start_price: ensemble.start_price,
            path_count: n,
            mean_terminal: mean,
            p05_terminal: nearest_rank(&terminals, 0.05),
            median_terminal: nearest_rank(&terminals, 0.5),
            p95_terminal: nearest_rank(&terminals, 0.95),
            prob_below_start: below as f64 / n as f64,
        })
    }

    /// Expected terminal return relative to the start price.
    pub fn expected_return(&self) -> f64 {
        self.mean_terminal / self.start_price - 1.0
    }
}

fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    let idx = (q * sorted.len() as f64).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use titan_core::{Path, PathPoint};

    fn ensemble_with_terminals(start: f64, terminals: &[f64]) -> Ensemble {
        Ensemble {
            start_price: start,
            days: 1,
            paths: terminals
                .iter()
                .map(|&t| {
                    Path::new(vec![
                        PathPoint { step: 0, price: start },
                        PathPoint { step: 1, price: t },
                    ])
                })
                .collect(),
        }
    }

    #[test]
    fn empty_ensemble_has_no_summary() {
        let e = ensemble_with_terminals(100.0, &[]);
        assert!(EnsembleSummary::from_ensemble(&e).is_none());
    }

    #[test]
    fn ten_paths() {
        let terminals = [91.0, 95.0, 99.0, 100.0, 101.0, 102.0, 104.0, 106.0, 108.0, 110.0];
        let e = ensemble_with_terminals(100.0, &terminals);
        let s = EnsembleSummary::from_ensemble(&e).unwrap();

        assert_eq!(s.path_count, 10);
        assert!((s.mean_terminal - 101.6).abs() < 1e-9);
        assert_eq!(s.p05_terminal, 91.0); // floor(0.5) = 0
        assert_eq!(s.median_terminal, 102.0); // floor(5.0) = 5
        assert_eq!(s.p95_terminal, 110.0); // floor(9.5) = 9
        assert!((s.prob_below_start - 0.3).abs() < 1e-12);
        assert!((s.expected_return() - 0.016).abs() < 1e-9);
    }

    #[test]
    fn single_path() {
        let e = ensemble_with_terminals(50.0, &[55.0]);
        let s = EnsembleSummary::from_ensemble(&e).unwrap();
        assert_eq!(s.p05_terminal, 55.0);
        assert_eq!(s.p95_terminal, 55.0);
        assert_eq!(s.prob_below_start, 0.0);
    }
}
