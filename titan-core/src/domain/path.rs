//! Simulated forward price paths.

use serde::{Deserialize, Serialize};

/// One step on a simulated path. Step 0 is the anchor (starting price).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub step: usize,
    pub price: f64,
}

/// A single simulated trajectory of `days + 1` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<PathPoint>,
}

impl Path {
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price at step 0.
    pub fn start_price(&self) -> Option<f64> {
        self.points.first().map(|p| p.price)
    }

    /// Price at the final step.
    pub fn terminal_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

/// Independent paths sharing a start price and parameters. Order is irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    pub start_price: f64,
    pub days: usize,
    pub paths: Vec<Path>,
}

impl Ensemble {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths.iter().filter_map(Path::terminal_price).collect()
    }

    /// Lowest and highest price over every point of every path.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.paths
            .iter()
            .flat_map(|p| p.points().iter().map(|pt| pt.price))
            .fold(None, |acc, price| match acc {
                None => Some((price, price)),
                Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
            })
    }
}
