//! Error type for algebraic number operations
//!
//! Construction from caller-supplied data and division are the fallible
//! surfaces. Internal invariant breaches (isolation failing below the
//! precision cap, malformed intermediate polynomials) are defects and panic
//! rather than surfacing here.

use thiserror::Error;

/// Error type for algebraic number operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Division or reciprocal of the zero algebraic number
    #[error("division by zero algebraic number")]
    DivisionByZero,
    /// The zero polynomial has every number as a root and defines nothing
    #[error("zero polynomial does not define an algebraic number")]
    ZeroPolynomial,
    /// The supplied enclosure excludes every root of the supplied polynomial
    #[error("enclosure contains no root of the polynomial")]
    NoRootInEnclosure,
    /// The supplied enclosure could not be narrowed around a single root
    #[error("enclosure does not isolate a unique root of the polynomial")]
    AmbiguousEnclosure,
}

/// Result type for algebraic number operations
pub type Result<T> = std::result::Result<T, Error>;
