//! Rational Möbius transforms of an algebraic number.
//!
//! Operations mixing one algebraic operand with rationals are fractional
//! linear maps `x -> (a*x + b) / (c*x + d)`. These never need resultants:
//! substituting the inverse map into the minimal polynomial and clearing
//! denominators yields the image's minimal polynomial directly, because an
//! invertible rational map preserves both the algebraic degree and the
//! conjugate orbit. The enclosure is transported through the same formula
//! in box arithmetic.

use crate::enclosure::Enclosure;
use crate::isolate::{isolate_with, IsolationConfig};
use crate::number::AlgebraicNumber;
use crate::poly::IntPoly;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// A fractional linear map `x -> (a*x + b) / (c*x + d)` with rational
/// parameters and nonzero determinant.
pub(crate) struct Mobius {
    a: BigRational,
    b: BigRational,
    c: BigRational,
    d: BigRational,
}

impl Mobius {
    fn new(a: BigRational, b: BigRational, c: BigRational, d: BigRational) -> Self {
        let m = Self { a, b, c, d };
        debug_assert!(!m.determinant().is_zero(), "degenerate transform");
        m
    }

    /// `x + q`.
    pub fn add_const(q: &BigRational) -> Self {
        Self::new(
            BigRational::one(),
            q.clone(),
            BigRational::zero(),
            BigRational::one(),
        )
    }

    /// `x - q`.
    pub fn sub_const(q: &BigRational) -> Self {
        Self::add_const(&-q.clone())
    }

    /// `q - x`.
    pub fn const_sub(q: &BigRational) -> Self {
        Self::new(
            -BigRational::one(),
            q.clone(),
            BigRational::zero(),
            BigRational::one(),
        )
    }

    /// `q * x` for nonzero `q`.
    pub fn mul_const(q: &BigRational) -> Self {
        Self::new(
            q.clone(),
            BigRational::zero(),
            BigRational::zero(),
            BigRational::one(),
        )
    }

    /// `x / q` for nonzero `q`.
    pub fn div_const(q: &BigRational) -> Self {
        Self::new(
            BigRational::one(),
            BigRational::zero(),
            BigRational::zero(),
            q.clone(),
        )
    }

    /// `q / x` for nonzero `q`.
    pub fn const_div(q: &BigRational) -> Self {
        Self::new(
            BigRational::zero(),
            q.clone(),
            BigRational::one(),
            BigRational::zero(),
        )
    }

    /// `1 / x`.
    pub fn recip() -> Self {
        Self::const_div(&BigRational::one())
    }

    fn determinant(&self) -> BigRational {
        &self.a * &self.d - &self.b * &self.c
    }
}

/// Apply a Möbius transform to an irrational operand.
///
/// The image polynomial is `sum_k p_k N(z)^k D(z)^(n-k)` for the
/// integerized inverse map `x = N(z) / D(z)`; it has the same degree as
/// the operand's minimal polynomial and is minimal after normalization,
/// so no factor search is needed. Rational operands are evaluated exactly
/// by the caller instead; the pole `-d/c` is rational and therefore
/// unreachable here.
pub(crate) fn apply(x: &AlgebraicNumber, m: &Mobius) -> AlgebraicNumber {
    debug_assert!(x.degree() >= 2, "rational operands take the exact path");

    // Clear denominators so the substitution stays over the integers.
    let l = [&m.a, &m.b, &m.c, &m.d]
        .iter()
        .fold(BigInt::one(), |acc, v| acc.lcm(v.denom()));
    let scale = BigRational::from_integer(l);
    let ai = (&m.a * &scale).to_integer();
    let bi = (&m.b * &scale).to_integer();
    let ci = (&m.c * &scale).to_integer();
    let di = (&m.d * &scale).to_integer();

    let p = x.minimal_polynomial();
    let n = p.degree();
    // Inverse map: x = (d*z - b) / (-c*z + a).
    let num = IntPoly::new([-bi, di]);
    let den = IntPoly::new([ai, -ci]);
    let mut den_pows = Vec::with_capacity(n + 1);
    den_pows.push(IntPoly::one());
    for j in 1..=n {
        den_pows.push(den_pows[j - 1].mul(&den));
    }
    let mut q = IntPoly::zero();
    for k in (0..=n).rev() {
        q = q.mul(&num).add(&den_pows[n - k].scale(&p.coeff(k)));
    }
    let candidate = q.canonical();
    debug_assert_eq!(candidate.degree(), n, "Möbius maps preserve degree");

    let cfg = IsolationConfig::default();
    let bx = isolate_with(&candidate, &cfg, |prec| {
        let bz = x.box_at(prec);
        let num_b = bz
            .scale_rational(&m.a)
            .add(&Enclosure::from_rational(&m.b), prec);
        let den_b = bz
            .scale_rational(&m.c)
            .add(&Enclosure::from_rational(&m.d), prec);
        num_b.checked_div(&den_b, prec)
    });
    AlgebraicNumber::from_parts(candidate, bx)
}
