//! Rational interval arithmetic with directed dyadic rounding.
//!
//! Endpoints are exact `BigRational` values. Arithmetic takes a working
//! precision and rounds result endpoints outward onto the dyadic grid
//! `2^-prec`, so endpoint size stays proportional to the working precision
//! instead of compounding across operations. Every result contains the
//! exact image of its inputs; higher precision only tightens it.
//!
//! Reference: Moore, Kearfott & Cloud, "Introduction to Interval Analysis".

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Round `x` down to the nearest multiple of `2^-prec`.
pub(crate) fn dyadic_floor(x: &BigRational, prec: u32) -> BigRational {
    let q = (x.numer() << prec).div_floor(x.denom());
    BigRational::new(q, BigInt::one() << prec)
}

/// Round `x` up to the nearest multiple of `2^-prec`.
pub(crate) fn dyadic_ceil(x: &BigRational, prec: u32) -> BigRational {
    let q = (x.numer() << prec).div_ceil(x.denom());
    BigRational::new(q, BigInt::one() << prec)
}

/// A precision whose grid step `2^-prec` is at most `t`.
pub(crate) fn prec_for_target(t: &BigRational) -> u32 {
    debug_assert!(t.is_positive(), "precision target must be positive");
    if *t >= BigRational::one() {
        return 0;
    }
    let q = t.denom().div_floor(t.numer());
    (q.bits() as u32).saturating_add(1)
}

/// A closed real interval `[lo, hi]` with exact rational endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Lower endpoint (inclusive).
    lo: BigRational,
    /// Upper endpoint (inclusive).
    hi: BigRational,
}

impl Interval {
    /// Create an interval from ordered endpoints.
    pub fn new(lo: BigRational, hi: BigRational) -> Self {
        debug_assert!(lo <= hi, "interval endpoints out of order");
        Self { lo, hi }
    }

    /// Create a degenerate interval containing exactly `v`.
    pub fn point(v: BigRational) -> Self {
        Self { lo: v.clone(), hi: v }
    }

    /// Create the interval `[c - r, c + r]`.
    pub fn centered(c: &BigRational, r: &BigRational) -> Self {
        debug_assert!(!r.is_negative());
        Self { lo: c - r, hi: c + r }
    }

    /// The degenerate zero interval `[0, 0]`.
    pub fn zero() -> Self {
        Self { lo: BigRational::zero(), hi: BigRational::zero() }
    }

    /// Lower endpoint.
    #[inline]
    pub fn lo(&self) -> &BigRational {
        &self.lo
    }

    /// Upper endpoint.
    #[inline]
    pub fn hi(&self) -> &BigRational {
        &self.hi
    }

    /// Exact midpoint `(lo + hi) / 2`.
    pub fn midpoint(&self) -> BigRational {
        (&self.lo + &self.hi) / BigRational::from_integer(BigInt::from(2))
    }

    /// Exact width `hi - lo`.
    pub fn width(&self) -> BigRational {
        &self.hi - &self.lo
    }

    /// Whether the interval is a single point.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// Whether the interval is exactly `[0, 0]`.
    pub fn is_zero_point(&self) -> bool {
        self.lo.is_zero() && self.hi.is_zero()
    }

    /// Whether `0` lies in the interval.
    pub fn contains_zero(&self) -> bool {
        !self.lo.is_positive() && !self.hi.is_negative()
    }

    /// Whether `v` lies in the interval.
    pub fn contains(&self, v: &BigRational) -> bool {
        self.lo <= *v && *v <= self.hi
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains_interval(&self, other: &Self) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    /// Whether every point of the interval is `> 0`.
    pub fn is_strictly_positive(&self) -> bool {
        self.lo.is_positive()
    }

    /// Whether every point of the interval is `< 0`.
    pub fn is_strictly_negative(&self) -> bool {
        self.hi.is_negative()
    }

    /// Sign of the interval when every point agrees on one, else `None`.
    pub fn decided_sign(&self) -> Option<Ordering> {
        if self.lo.is_positive() {
            Some(Ordering::Greater)
        } else if self.hi.is_negative() {
            Some(Ordering::Less)
        } else if self.lo.is_zero() && self.hi.is_zero() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    /// Upper bound on `|x|` over the interval.
    pub fn mag(&self) -> BigRational {
        let a = self.lo.abs();
        let b = self.hi.abs();
        if a > b { a } else { b }
    }

    /// Intersection, or `None` when the intervals are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let lo = if self.lo >= other.lo { self.lo.clone() } else { other.lo.clone() };
        let hi = if self.hi <= other.hi { self.hi.clone() } else { other.hi.clone() };
        if lo <= hi { Some(Self { lo, hi }) } else { None }
    }

    /// Smallest interval containing both operands.
    pub fn hull(&self, other: &Self) -> Self {
        let lo = if self.lo <= other.lo { self.lo.clone() } else { other.lo.clone() };
        let hi = if self.hi >= other.hi { self.hi.clone() } else { other.hi.clone() };
        Self { lo, hi }
    }

    /// Exact negation `[-hi, -lo]`.
    pub fn neg(&self) -> Self {
        Self { lo: -&self.hi, hi: -&self.lo }
    }

    /// Exact halving of both endpoints.
    pub fn halve(&self) -> Self {
        let two = BigRational::from_integer(BigInt::from(2));
        Self { lo: &self.lo / &two, hi: &self.hi / &two }
    }

    /// Exact scaling by a rational factor, reversing orientation for
    /// negative factors.
    pub fn scale_rational(&self, c: &BigRational) -> Self {
        let a = &self.lo * c;
        let b = &self.hi * c;
        if c.is_negative() {
            Self { lo: b, hi: a }
        } else {
            Self { lo: a, hi: b }
        }
    }

    /// Clamp the lower endpoint up to zero.
    ///
    /// Valid only when the enclosed true value is known nonnegative, so a
    /// negative lower endpoint is pure rounding slack.
    pub(crate) fn nonneg_part(&self) -> Self {
        debug_assert!(!self.hi.is_negative());
        let lo = if self.lo.is_negative() { BigRational::zero() } else { self.lo.clone() };
        Self { lo, hi: self.hi.clone() }
    }

    /// Round both endpoints outward onto the `2^-prec` grid.
    pub fn round_out(&self, prec: u32) -> Self {
        Self {
            lo: dyadic_floor(&self.lo, prec),
            hi: dyadic_ceil(&self.hi, prec),
        }
    }

    /// Interval sum, rounded outward at `prec`.
    pub fn add(&self, rhs: &Self, prec: u32) -> Self {
        Self {
            lo: dyadic_floor(&(&self.lo + &rhs.lo), prec),
            hi: dyadic_ceil(&(&self.hi + &rhs.hi), prec),
        }
    }

    /// Interval difference, rounded outward at `prec`.
    pub fn sub(&self, rhs: &Self, prec: u32) -> Self {
        Self {
            lo: dyadic_floor(&(&self.lo - &rhs.hi), prec),
            hi: dyadic_ceil(&(&self.hi - &rhs.lo), prec),
        }
    }

    /// Interval product, rounded outward at `prec`.
    pub fn mul(&self, rhs: &Self, prec: u32) -> Self {
        let candidates = [
            &self.lo * &rhs.lo,
            &self.lo * &rhs.hi,
            &self.hi * &rhs.lo,
            &self.hi * &rhs.hi,
        ];
        let (lo, hi) = min_max(&candidates);
        Self {
            lo: dyadic_floor(lo, prec),
            hi: dyadic_ceil(hi, prec),
        }
    }

    /// Tight interval square, rounded outward at `prec`.
    ///
    /// Tighter than `mul(self, self)` when the interval spans zero.
    pub fn sqr(&self, prec: u32) -> Self {
        let a = &self.lo * &self.lo;
        let b = &self.hi * &self.hi;
        let (lo, hi) = if self.contains_zero() {
            (BigRational::zero(), if a > b { a } else { b })
        } else if a <= b {
            (a, b)
        } else {
            (b, a)
        };
        Self {
            lo: dyadic_floor(&lo, prec),
            hi: dyadic_ceil(&hi, prec),
        }
    }

    /// Enclosure of the `n`-th power, rounded outward at `prec`.
    ///
    /// Square-and-multiply, with squaring steps going through
    /// [`Interval::sqr`] so even powers of an interval spanning zero
    /// stay nonnegative.
    pub fn powi(&self, n: u32, prec: u32) -> Self {
        if n == 0 {
            return Self::point(BigRational::one());
        }
        let mut acc = Self::point(BigRational::one());
        let mut base = self.clone();
        let mut k = n;
        while k > 1 {
            if k & 1 == 1 {
                acc = acc.mul(&base, prec);
            }
            base = base.sqr(prec);
            k >>= 1;
        }
        acc.mul(&base, prec)
    }

    /// Interval quotient, rounded outward at `prec`.
    ///
    /// Returns `None` when the divisor interval contains zero; the caller
    /// reacts by escalating the precision of the divisor.
    pub fn checked_div(&self, rhs: &Self, prec: u32) -> Option<Self> {
        if rhs.contains_zero() {
            return None;
        }
        let candidates = [
            &self.lo / &rhs.lo,
            &self.lo / &rhs.hi,
            &self.hi / &rhs.lo,
            &self.hi / &rhs.hi,
        ];
        let (lo, hi) = min_max(&candidates);
        Some(Self {
            lo: dyadic_floor(lo, prec),
            hi: dyadic_ceil(hi, prec),
        })
    }

    /// Enclosure of the square root of a nonnegative interval.
    pub fn sqrt(&self, prec: u32) -> Self {
        debug_assert!(!self.lo.is_negative(), "sqrt of a negative interval");
        Self {
            lo: rational_sqrt_lower(&self.lo, prec),
            hi: rational_sqrt_upper(&self.hi, prec),
        }
    }

    /// Enclosure of the principal `n`-th root of a nonnegative interval.
    pub fn nth_root(&self, n: u32, prec: u32) -> Self {
        debug_assert!(n >= 1);
        debug_assert!(!self.lo.is_negative(), "nth_root of a negative interval");
        Self {
            lo: rational_root_lower(&self.lo, n, prec),
            hi: rational_root_upper(&self.hi, n, prec),
        }
    }

    /// `f64` approximation of the midpoint, for display and seeding only.
    pub fn approx_f64(&self) -> f64 {
        self.midpoint().to_f64().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

fn min_max<'a>(values: &'a [BigRational]) -> (&'a BigRational, &'a BigRational) {
    let mut lo = &values[0];
    let mut hi = &values[0];
    for v in &values[1..] {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    (lo, hi)
}

/// Dyadic lower bound on `sqrt(x)` for `x >= 0`.
fn rational_sqrt_lower(x: &BigRational, prec: u32) -> BigRational {
    debug_assert!(!x.is_negative());
    // floor(x * 4^prec) has integer square root s with (s / 2^prec)^2 <= x.
    let scaled = (x.numer() << (2 * prec)).div_floor(x.denom());
    BigRational::new(scaled.sqrt(), BigInt::one() << prec)
}

/// Dyadic upper bound on `sqrt(x)` for `x >= 0`.
pub(crate) fn rational_sqrt_upper(x: &BigRational, prec: u32) -> BigRational {
    debug_assert!(!x.is_negative());
    let scaled = (x.numer() << (2 * prec)).div_floor(x.denom());
    BigRational::new(scaled.sqrt() + 1, BigInt::one() << prec)
}

/// Dyadic lower bound on `x^(1/n)` for `x >= 0`.
fn rational_root_lower(x: &BigRational, n: u32, prec: u32) -> BigRational {
    debug_assert!(!x.is_negative());
    let scaled = (x.numer() << (n * prec)).div_floor(x.denom());
    BigRational::new(scaled.nth_root(n), BigInt::one() << prec)
}

/// Dyadic upper bound on `x^(1/n)` for `x >= 0`.
fn rational_root_upper(x: &BigRational, n: u32, prec: u32) -> BigRational {
    debug_assert!(!x.is_negative());
    let scaled = (x.numer() << (n * prec)).div_floor(x.denom());
    BigRational::new(scaled.nth_root(n) + 1, BigInt::one() << prec)
}
