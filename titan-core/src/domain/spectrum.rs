//! Synthetic frequency/amplitude bins.

use serde::{Deserialize, Serialize};

/// One bin of the decorative spectrum. Not derived from any real transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    pub frequency: u32,
    pub amplitude: f64,
}
