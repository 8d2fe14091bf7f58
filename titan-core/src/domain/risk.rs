//! Value-at-Risk estimate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    /// Loss magnitude at the configured confidence, as a log-return fraction.
    pub var_pct: f64,
    /// `var_pct` scaled by the caller's capital.
    pub var_cash: f64,
    /// Decorative position-sizing fraction. Not a Kelly-criterion computation.
    pub kelly: f64,
}
