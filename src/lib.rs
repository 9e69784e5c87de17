//! Exact arithmetic on real and complex algebraic numbers.
//!
//! An [`AlgebraicNumber`] is a root of an integer polynomial, represented
//! by its minimal polynomial together with a complex interval enclosure
//! that isolates exactly one root. Arithmetic is exact: every result
//! carries its own minimal polynomial, and predicates such as equality,
//! sign, and ordering are decided, never guessed from floating-point
//! approximations.
//!
//! The crate provides:
//! - [`AlgebraicNumber`]: closed under `+ - * /`, negation, conjugation,
//!   principal roots, and integer powers
//! - [`IntPoly`]: integer polynomials with gcds, resultant combinators,
//!   and certified root isolation
//! - [`Interval`] and [`Enclosure`]: outward-rounded dyadic interval and
//!   complex box arithmetic
//!
//! # Examples
//!
//! ## Radicals stay exact
//!
//! ```
//! use qbar::AlgebraicNumber;
//!
//! let two = AlgebraicNumber::from(2i64);
//! let sqrt2 = two.sqrt();
//!
//! // Squaring recovers 2 exactly, not an approximation of it.
//! assert_eq!(&sqrt2 * &sqrt2, two);
//! assert!((&sqrt2 / &sqrt2).is_one());
//! ```
//!
//! ## Field arithmetic finds minimal polynomials
//!
//! ```
//! use qbar::{AlgebraicNumber, IntPoly};
//!
//! let sum = AlgebraicNumber::from(2i64).sqrt() + AlgebraicNumber::from(3i64).sqrt();
//!
//! assert_eq!(sum.degree(), 4);
//! assert_eq!(
//!     sum.minimal_polynomial(),
//!     &IntPoly::from_i64(&[1, 0, -10, 0, 1])
//! );
//! ```
//!
//! ## Complex values and decided predicates
//!
//! ```
//! use qbar::AlgebraicNumber;
//!
//! let i = AlgebraicNumber::i();
//! assert!(!i.is_real());
//! assert_eq!(&i * &i, AlgebraicNumber::from(-1i64));
//!
//! assert!(AlgebraicNumber::from(2i64).sqrt() < AlgebraicNumber::from(3i64).sqrt());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod arith;
pub mod enclosure;
pub mod error;
pub mod interval;
pub mod isolate;
pub mod number;
pub mod poly;

pub use enclosure::Enclosure;
pub use error::{Error, Result};
pub use interval::Interval;
pub use isolate::IsolationConfig;
pub use number::AlgebraicNumber;
pub use poly::IntPoly;
