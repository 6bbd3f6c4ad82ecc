//! Coefficient sequences shared by the recursion and the frequency analyzer.
//!
//! The same storage is read two ways:
//! - as recursion taps, where index 0 multiplies the current sample
//! - as a polynomial in `s`, where index 0 is the highest-power coefficient
//!
//! A leading coefficient of exactly zero is never divided by. Callers that
//! normalise by it use [`Polynomial::leading_or_one`], and can ask
//! [`Polynomial::leading_is_degenerate`] whether the substitution happened.

use crate::complex::Complex;
use crate::error::{CoreError, CoreResult};

/// Non-empty ordered sequence of real coefficients.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Build a polynomial, rejecting an empty coefficient list.
    pub fn new(coeffs: Vec<f64>) -> CoreResult<Self> {
        if coeffs.is_empty() {
            return Err(CoreError::InvalidArg {
                what: "polynomial must have at least one coefficient",
            });
        }
        Ok(Self { coeffs })
    }

    pub fn from_slice(coeffs: &[f64]) -> CoreResult<Self> {
        Self::new(coeffs.to_vec())
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree when read as a polynomial in `s` (highest power first).
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// True when the leading coefficient is exactly zero.
    pub fn leading_is_degenerate(&self) -> bool {
        self.coeffs[0] == 0.0
    }

    /// Leading coefficient, or `1.0` when it is exactly zero.
    pub fn leading_or_one(&self) -> f64 {
        if self.leading_is_degenerate() {
            1.0
        } else {
            self.coeffs[0]
        }
    }

    /// Evaluate `Σ c[i] · s^(k-i)` with `k` the degree.
    ///
    /// Each power is built by repeated multiplication.
    pub fn eval_complex(&self, s: Complex) -> Complex {
        let k = self.degree();
        self.coeffs
            .iter()
            .enumerate()
            .fold(Complex::ZERO, |acc, (i, &c)| {
                acc + s.powi((k - i) as u32).scale(c)
            })
    }
}

impl TryFrom<Vec<f64>> for Polynomial {
    type Error = CoreError;

    fn try_from(coeffs: Vec<f64>) -> CoreResult<Self> {
        Self::new(coeffs)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(p: Polynomial) -> Self {
        p.coeffs
    }
}
