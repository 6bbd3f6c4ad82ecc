//! cs-core: shared foundation for controlsim.
//!
//! Contains:
//! - complex (value-type complex arithmetic used by frequency analysis)
//! - polynomial (coefficient sequences + degeneracy policy)
//! - numeric (finite checks + sample counting)
//! - units (uom SI time + constructors)
//! - error (shared error types)

pub mod complex;
pub mod error;
pub mod numeric;
pub mod polynomial;
pub mod units;

pub use complex::Complex;
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use polynomial::Polynomial;
pub use units::*;
