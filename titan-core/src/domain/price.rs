//! Historical price points and the series that holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One synthetic trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// Running synthetic close price.
    pub close: f64,
    /// Dimensionless deviation-from-trend score, scaled by relative volume.
    pub reflexivity: f64,
}

/// Chronologically ordered price points. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Wrap already-ordered points.
    ///
    /// The synthesizer is the usual producer; tests and callers holding
    /// their own closes may build one directly.
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Series of closes on consecutive days starting at `start`, zero reflexivity.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .zip(start.iter_days())
            .map(|(&close, date)| PricePoint {
                date,
                close,
                reflexivity: 0.0,
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Close of the final point (the anchor for forward simulation).
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }
}
