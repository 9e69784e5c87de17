//! Dense univariate integer polynomial arithmetic.
//!
//! [`IntPoly`] stores coefficients low-to-high with no trailing zeros and is
//! the exact half of an algebraic number. Everything an algebraic number's
//! defining polynomial needs lives here: content and primitive part,
//! primitive-PRS gcd, squarefree part, exact division, and evaluation at
//! rational points and at complex interval boxes.
//!
//! Reference: Geddes, Czapor & Labahn, "Algorithms for Computer Algebra",
//! chapters 2 and 7.

pub mod resultant;
pub mod roots;

use crate::enclosure::Enclosure;
use crate::interval::Interval;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Inline capacity for coefficient storage; most minimal polynomials of
/// practically occurring algebraic numbers have small degree.
type CoeffVec = SmallVec<[BigInt; 8]>;

/// A dense univariate polynomial with arbitrary-precision integer
/// coefficients, stored low-to-high with no trailing zero.
///
/// The zero polynomial is the empty coefficient list.
#[derive(Clone, PartialEq, Eq)]
pub struct IntPoly {
    coeffs: CoeffVec,
}

impl IntPoly {
    /// Create a polynomial from low-to-high coefficients, trimming
    /// trailing zeros.
    pub fn new(coeffs: impl IntoIterator<Item = BigInt>) -> Self {
        let mut coeffs: CoeffVec = coeffs.into_iter().collect();
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Create a polynomial from `i64` coefficients, low-to-high.
    pub fn from_i64(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| BigInt::from(c)))
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: SmallVec::new() }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self { coeffs: smallvec![BigInt::one()] }
    }

    /// The identity polynomial `x`.
    pub fn x() -> Self {
        Self { coeffs: smallvec![BigInt::zero(), BigInt::one()] }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: BigInt) -> Self {
        Self::new([c])
    }

    /// The polynomial `den*x - num`, whose single root is the reduced
    /// rational `num/den`. This is the canonical degree-1 form.
    pub fn linear_from_rational(v: &BigRational) -> Self {
        // Ratio keeps the denominator positive and the fraction reduced,
        // which is exactly the canonical-form requirement.
        Self::new([-v.numer(), v.denom().clone()])
    }

    /// Whether this is the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Whether this is a constant (degree 0 or zero polynomial).
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree, with constants (including zero) reported as degree 0.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Coefficient of `x^i`, zero beyond the degree.
    pub fn coeff(&self, i: usize) -> BigInt {
        self.coeffs.get(i).cloned().unwrap_or_else(BigInt::zero)
    }

    /// All coefficients, low-to-high.
    #[inline]
    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// Leading coefficient. Panics on the zero polynomial.
    pub fn leading_coeff(&self) -> &BigInt {
        self.coeffs.last().unwrap_or_else(|| {
            panic!("leading coefficient of the zero polynomial")
        })
    }

    /// Constant coefficient, zero for the zero polynomial.
    pub fn constant_coeff(&self) -> BigInt {
        self.coeff(0)
    }

    /// Formal derivative.
    pub fn derivative(&self) -> Self {
        if self.is_constant() {
            return Self::zero();
        }
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * BigInt::from(i)),
        )
    }

    /// Integer content: nonnegative gcd of all coefficients.
    ///
    /// The content of the zero polynomial is zero.
    pub fn content(&self) -> BigInt {
        let mut g = BigInt::zero();
        for c in &self.coeffs {
            g = g.gcd(c);
            if g.is_one() {
                break;
            }
        }
        g
    }

    /// Divide out the integer content. Panics on the zero polynomial.
    pub fn primitive_part(&self) -> Self {
        let content = self.content();
        if content.is_zero() {
            panic!("primitive part of the zero polynomial");
        }
        if content.is_one() {
            return self.clone();
        }
        Self {
            coeffs: self.coeffs.iter().map(|c| c / &content).collect(),
        }
    }

    /// Negate every coefficient.
    pub fn neg(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    /// Flip the sign of the leading coefficient to positive.
    pub fn sign_normalized(&self) -> Self {
        if self.is_zero() || !self.leading_coeff().is_negative() {
            self.clone()
        } else {
            self.neg()
        }
    }

    /// The polynomial `p(-x)`: negate the odd-degree coefficients.
    ///
    /// Its roots are the negatives of the roots of `p`.
    pub fn reflected(&self) -> Self {
        Self {
            coeffs: self
                .coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| if i % 2 == 1 { -c } else { c.clone() })
                .collect(),
        }
    }

    /// The polynomial `p(x^n)`: spread coefficients to stride `n`.
    pub fn compose_power(&self, n: u32) -> Self {
        debug_assert!(n >= 1);
        if self.is_constant() || n == 1 {
            return self.clone();
        }
        let n = n as usize;
        let mut coeffs: CoeffVec = smallvec![BigInt::zero(); self.degree() * n + 1];
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs[i * n] = c.clone();
        }
        Self { coeffs }
    }

    /// Sum of two polynomials.
    pub fn add(&self, rhs: &Self) -> Self {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        Self::new((0..n).map(|i| self.coeff(i) + rhs.coeff(i)))
    }

    /// Difference of two polynomials.
    pub fn sub(&self, rhs: &Self) -> Self {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        Self::new((0..n).map(|i| self.coeff(i) - rhs.coeff(i)))
    }

    /// Product of two polynomials (schoolbook; degrees here stay small).
    pub fn mul(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        let mut coeffs: CoeffVec =
            smallvec![BigInt::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Self { coeffs }
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: &BigInt) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            coeffs: self.coeffs.iter().map(|a| a * c).collect(),
        }
    }

    /// Multiply by `x^k`.
    pub fn mul_xpow(&self, k: usize) -> Self {
        if self.is_zero() || k == 0 {
            return self.clone();
        }
        let mut coeffs: CoeffVec = smallvec![BigInt::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Exact division over the integers.
    ///
    /// Returns `Some(q)` with `self = q * divisor` when the quotient exists
    /// in `Z[x]` with zero remainder, `None` otherwise.
    pub fn exact_div(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            panic!("division by the zero polynomial");
        }
        if self.is_zero() {
            return Some(Self::zero());
        }
        if self.degree() < divisor.degree() {
            return None;
        }
        let deg_b = divisor.degree();
        let deg_q = self.degree() - deg_b;
        let lc = divisor.leading_coeff();
        let mut rem: CoeffVec = self.coeffs.clone();
        let mut q: CoeffVec = smallvec![BigInt::zero(); deg_q + 1];
        for k in (0..=deg_q).rev() {
            // Taking the head zeroes its slot, matching an exact cancel.
            let head = std::mem::take(&mut rem[k + deg_b]);
            if head.is_zero() {
                continue;
            }
            let (quot, r) = head.div_rem(lc);
            if !r.is_zero() {
                return None;
            }
            for j in 0..deg_b {
                rem[k + j] -= &quot * &divisor.coeffs[j];
            }
            q[k] = quot;
        }
        if rem.iter().any(|c| !c.is_zero()) {
            return None;
        }
        Some(Self { coeffs: q })
    }

    /// Pseudo-remainder: `r` with `lc(b)^s * self = q*b + r` for some `q`
    /// and some `s <= deg(self) - deg(b) + 1`.
    pub fn pseudo_remainder(&self, divisor: &Self) -> Self {
        if divisor.is_zero() {
            panic!("division by the zero polynomial");
        }
        if divisor.is_constant() {
            // A nonzero constant divides everything.
            return Self::zero();
        }
        let deg_b = divisor.degree();
        let lc_b = divisor.leading_coeff().clone();
        let mut r = self.clone();
        // Each step cancels the leading term, so deg(r) strictly drops.
        while !r.is_zero() && r.degree() >= deg_b {
            let shift = r.degree() - deg_b;
            let lc_r = r.leading_coeff().clone();
            r = r.scale(&lc_b).sub(&divisor.scale(&lc_r).mul_xpow(shift));
        }
        r
    }

    /// Primitive polynomial gcd by the primitive pseudo-remainder sequence.
    ///
    /// The result is primitive with a positive leading coefficient.
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return if other.is_zero() {
                Self::zero()
            } else {
                other.primitive_part().sign_normalized()
            };
        }
        if other.is_zero() {
            return self.primitive_part().sign_normalized();
        }
        let mut a = self.primitive_part();
        let mut b = other.primitive_part();
        if a.degree() < b.degree() {
            std::mem::swap(&mut a, &mut b);
        }
        while !b.is_zero() {
            if b.is_constant() {
                // Nonzero constant divides every primitive polynomial
                // only up to content, so the gcd collapses to 1.
                return Self::one();
            }
            let r = a.pseudo_remainder(&b);
            a = b;
            b = if r.is_zero() { r } else { r.primitive_part() };
        }
        a.sign_normalized()
    }

    /// Squarefree part `p / gcd(p, p')`, primitive.
    ///
    /// In characteristic zero a single cofactor pass is squarefree; no
    /// repetition is needed.
    pub fn squarefree_part(&self) -> Self {
        if self.is_zero() {
            panic!("squarefree part of the zero polynomial");
        }
        let p = self.primitive_part();
        if p.degree() <= 1 {
            return p;
        }
        let g = p.gcd(&p.derivative());
        if g.is_constant() {
            return p;
        }
        match p.exact_div(&g) {
            Some(q) => q.primitive_part(),
            // Gauss: a primitive divisor of a primitive polynomial divides
            // it over the integers, so this division cannot fail.
            None => unreachable!("squarefree cofactor division is exact"),
        }
    }

    /// Canonical defining-polynomial form: primitive, squarefree, positive
    /// leading coefficient. Panics on the zero polynomial.
    pub fn canonical(&self) -> Self {
        self.squarefree_part().sign_normalized()
    }

    /// Monic companion `lc^(d-1) * p(x / lc)`, whose roots are the roots of
    /// `p` scaled by the leading coefficient.
    ///
    /// All coefficients stay integral, so factor reconstruction can work
    /// with algebraic integers and read off monic integer factors.
    pub fn monic_scaled(&self) -> Self {
        if self.is_constant() {
            return self.clone();
        }
        let d = self.degree();
        let lc = self.leading_coeff().clone();
        let mut coeffs: CoeffVec = smallvec![BigInt::zero(); d + 1];
        coeffs[d] = BigInt::one();
        // coeff_i picks up lc^(d-1-i).
        let mut power = BigInt::one();
        for i in (0..d).rev() {
            coeffs[i] = &self.coeffs[i] * &power;
            power *= &lc;
        }
        Self { coeffs }
    }

    /// The polynomial `p(c * x)`: scale the root set by `1/c`.
    pub fn compose_scale(&self, c: &BigInt) -> Self {
        debug_assert!(!c.is_zero());
        let mut power = BigInt::one();
        let coeffs: CoeffVec = self
            .coeffs
            .iter()
            .map(|a| {
                let out = a * &power;
                power *= c;
                out
            })
            .collect();
        Self { coeffs }
    }

    /// Sum of squared coefficients (the squared 2-norm).
    pub fn norm2_sq(&self) -> BigInt {
        self.coeffs.iter().map(|c| c * c).sum()
    }

    /// Horner evaluation at an exact rational point.
    pub fn eval_rational(&self, x: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + BigRational::from_integer(c.clone());
        }
        acc
    }

    /// Horner evaluation over a real interval at `prec`.
    pub fn eval_interval(&self, x: &Interval, prec: u32) -> Interval {
        let mut acc = Interval::zero();
        for c in self.coeffs.iter().rev() {
            let term = Interval::point(BigRational::from_integer(c.clone()));
            acc = acc.mul(x, prec).add(&term, prec);
        }
        acc
    }

    /// Horner evaluation over a complex box at `prec`.
    ///
    /// The result contains `p(z)` for every `z` in the box.
    pub fn eval_box(&self, z: &Enclosure, prec: u32) -> Enclosure {
        let mut acc = Enclosure::zero();
        for c in self.coeffs.iter().rev() {
            let term = Enclosure::from_rational(&BigRational::from_integer(c.clone()));
            acc = acc.mul(z, prec).add(&term, prec);
        }
        acc
    }
}

impl fmt::Debug for IntPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntPoly({self})")
    }
}

impl fmt::Display for IntPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if first {
                if c.is_negative() {
                    write!(f, "-")?;
                }
                first = false;
            } else if c.is_negative() {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let mag = c.abs();
            if i == 0 {
                write!(f, "{mag}")?;
            } else if mag.is_one() {
                write!(f, "x")?;
            } else {
                write!(f, "{mag}*x")?;
            }
            if i > 1 {
                write!(f, "^{i}")?;
            }
        }
        Ok(())
    }
}
