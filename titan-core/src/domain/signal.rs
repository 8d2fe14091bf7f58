//! Discrete trading signal.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Bullish,
    Neutral,
    Bearish,
}

impl SignalKind {
    pub fn label(self) -> &'static str {
        match self {
            SignalKind::Bullish => "BULLISH",
            SignalKind::Neutral => "NEUTRAL",
            SignalKind::Bearish => "BEARISH",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signal plus the momentum score that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub momentum: f64,
}
