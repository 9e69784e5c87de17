//! Closed multiplication and division of real radicals.
//!
//! A real number whose minimal polynomial is a binomial `c_d x^d + c_0` is
//! a signed principal root `±(|c_0|/c_d)^(1/d)`. Products and quotients of
//! two such numbers are again signed principal roots of an explicit
//! rational, so they can bypass resultant elimination entirely:
//! with `g = gcd(d, e)` the combined index is `f = (d/g) * e` and the
//! bases combine as `p^(e/g) * q^(d/g)` (or the quotient for division).

use crate::number::AlgebraicNumber;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Pow, Signed, Zero};
use std::cmp::Ordering;
use tracing::trace;

use super::decided_real_sign;

/// A recognized signed radical `sign * base^(1/index)` with `base > 0`.
pub(crate) struct Radical {
    negative: bool,
    base: BigRational,
    index: u32,
}

/// Recognize a real signed principal root from its minimal polynomial.
///
/// Requires a strict binomial of degree at least 2 and a real value; the
/// sign is read off the enclosure. Complex roots of binomials (and
/// everything else) return `None` and take the general path.
pub(crate) fn as_radical(x: &AlgebraicNumber) -> Option<Radical> {
    let p = x.minimal_polynomial();
    let d = p.degree();
    if d < 2 {
        return None;
    }
    if !p.coeffs()[1..d].iter().all(Zero::is_zero) {
        return None;
    }
    if !x.is_real() {
        return None;
    }
    let negative = match decided_real_sign(x) {
        Ordering::Less => true,
        Ordering::Greater => false,
        // The binomial has a nonzero constant term, so zero is not a root.
        Ordering::Equal => unreachable!("real radical cannot be zero"),
    };
    Some(Radical {
        negative,
        base: BigRational::new(p.coeff(0).abs(), p.coeff(d)),
        index: d as u32,
    })
}

fn rational_pow(v: &BigRational, e: u32) -> BigRational {
    BigRational::new(Pow::pow(v.numer(), e), Pow::pow(v.denom(), e))
}

fn signed_root(base: &BigRational, index: u32, negative: bool) -> AlgebraicNumber {
    let root = AlgebraicNumber::nth_root_of_rational(base, index);
    if negative {
        -root
    } else {
        root
    }
}

/// `x * y` when both operands are recognized radicals.
pub(crate) fn try_mul(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Option<AlgebraicNumber> {
    let rx = as_radical(x)?;
    let ry = as_radical(y)?;
    let g = rx.index.gcd(&ry.index);
    let f = (rx.index / g) * ry.index;
    let base = rational_pow(&rx.base, ry.index / g) * rational_pow(&ry.base, rx.index / g);
    trace!(f, "radical product short-circuits elimination");
    Some(signed_root(&base, f, rx.negative != ry.negative))
}

/// `x / y` when both operands are recognized radicals; `y` is nonzero by
/// construction.
pub(crate) fn try_div(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Option<AlgebraicNumber> {
    let rx = as_radical(x)?;
    let ry = as_radical(y)?;
    let g = rx.index.gcd(&ry.index);
    let f = (rx.index / g) * ry.index;
    let base = rational_pow(&rx.base, ry.index / g) / rational_pow(&ry.base, rx.index / g);
    trace!(f, "radical quotient short-circuits elimination");
    Some(signed_root(&base, f, rx.negative != ry.negative))
}
