//! Randomized property suites for algebraic number arithmetic
//!
//! This module contains the slow randomized checks:
//! - Degree-1 values must agree with exact `BigRational` arithmetic
//! - Algebraic identities must hold exactly across every dispatch route

mod algebraic_properties;
mod rational_properties;
