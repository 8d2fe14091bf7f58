//! Engine error taxonomy.
//!
//! Every component validates its inputs before touching them and checks its
//! outputs before handing them back, so callers see one of two failures and
//! never a NaN buried inside a result.

use thiserror::Error;

/// Errors raised by the engine components.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The caller supplied input the component cannot work with
    /// (series too short, zero simulations, non-finite capital, ...).
    #[error("precondition violated in {component}: {reason}")]
    PreconditionViolation {
        component: &'static str,
        reason: String,
    },

    /// An intermediate value went NaN, infinite, or non-positive where a
    /// price is required.
    #[error("numeric anomaly in {component}: {detail}")]
    NumericAnomaly {
        component: &'static str,
        detail: String,
    },
}

impl EngineError {
    pub fn precondition(component: &'static str, reason: impl Into<String>) -> Self {
        EngineError::PreconditionViolation {
            component,
            reason: reason.into(),
        }
    }

    pub fn anomaly(component: &'static str, detail: impl Into<String>) -> Self {
        EngineError::NumericAnomaly {
            component,
            detail: detail.into(),
        }
    }

    /// Name of the component that raised the error.
    pub fn component(&self) -> &'static str {
        match self {
            EngineError::PreconditionViolation { component, .. }
            | EngineError::NumericAnomaly { component, .. } => component,
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, EngineError::PreconditionViolation { .. })
    }

    pub fn is_anomaly(&self) -> bool {
        matches!(self, EngineError::NumericAnomaly { .. })
    }
}

/// Fail with `NumericAnomaly` unless `price` is finite and strictly positive.
pub(crate) fn ensure_price(component: &'static str, what: &str, price: f64) -> Result<f64, EngineError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(EngineError::anomaly(
            component,
            format!("{what} is {price}, expected a finite positive price"),
        ))
    }
}

/// Fail with `NumericAnomaly` unless `value` is finite.
pub(crate) fn ensure_finite(component: &'static str, what: &str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::anomaly(component, format!("{what} is {value}")))
    }
}
