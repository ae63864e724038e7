//! The fixed registry of evaluable functions.
//!
//! Four functions are supported, known at build time. Dispatch is a plain
//! `match` over [`Function`]; the [`Integrand`] trait is the seam the
//! quadrature engine evaluates through, so callers can supply their own
//! evaluators (instrumented stubs in tests, for instance).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything the quadrature engine can sample.
pub trait Integrand {
    /// Evaluate the function at `x`.
    fn evaluate_at(&self, x: f64) -> f64;

    /// Display name.
    fn name(&self) -> &str;

    /// Identity in the engine's cache key.
    ///
    /// Two integrands that can evaluate differently must return different
    /// ids; equal ids let the engine reuse a result computed for the other.
    fn id(&self) -> u64;
}

/// A named, pure real-to-real function from the built-in registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    /// `y = x^2`
    #[default]
    Square,
    /// `y = x^3`
    Cube,
    /// `y = e^(-x)`
    NegExp,
    /// `y = sin(2x)`
    Sin2,
}

impl Function {
    /// Every registered function, in selector order.
    pub const ALL: [Self; 4] = [Self::Square, Self::Cube, Self::NegExp, Self::Sin2];

    /// Evaluate the function at `x`.
    #[must_use]
    pub fn evaluate(self, x: f64) -> f64 {
        match self {
            Self::Square => x.powi(2),
            Self::Cube => x.powi(3),
            Self::NegExp => (-x).exp(),
            Self::Sin2 => (2.0 * x).sin(),
        }
    }

    /// Human-readable formula.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Square => "y = x^2",
            Self::Cube => "y = x^3",
            Self::NegExp => "y = e^(-x)",
            Self::Sin2 => "y = sin(2x)",
        }
    }

    /// Interval the host switches to when this function is selected, if any.
    ///
    /// Only `sin(2x)` carries one: a quarter period, `[0, pi/2]`.
    #[must_use]
    pub fn preset_interval(self) -> Option<(f64, f64)> {
        match self {
            Self::Sin2 => Some((0.0, std::f64::consts::FRAC_PI_2)),
            Self::Square | Self::Cube | Self::NegExp => None,
        }
    }

    /// Short machine name used in config files and output file names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Cube => "cube",
            Self::NegExp => "neg_exp",
            Self::Sin2 => "sin2",
        }
    }
}

impl Integrand for Function {
    fn evaluate_at(&self, x: f64) -> f64 {
        self.evaluate(x)
    }

    fn name(&self) -> &str {
        self.label()
    }

    fn id(&self) -> u64 {
        *self as u64
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
