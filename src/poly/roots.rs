//! Root separation bounds and certified all-root approximation.
//!
//! Two facilities back the isolation machinery:
//!
//! - [`separation_lower_bound`]: a positive rational below the minimal
//!   pairwise root distance of a squarefree primitive integer polynomial,
//!   from its degree and coefficient size alone. A box tighter than this
//!   bound cannot contain two roots.
//! - [`certified_root_discs`]: simultaneous Weierstrass (Durand-Kerner)
//!   iteration in dyadic rational arithmetic, followed by exact a
//!   posteriori certification. Each returned disc provably contains at
//!   least one root, and pairwise disjointness then pins exactly one root
//!   per disc with every root covered.
//!
//! The iteration itself is heuristic; all guarantees come from the final
//! exact evaluation step, so a bad iterate can only cause a retry at
//! higher precision, never a wrong answer.
//!
//! Reference: Mahler, "An inequality for the discriminant of a polynomial"
//! (1964); McNamee & Pan, "Numerical Methods for Roots of Polynomials".

use super::IntPoly;
use crate::enclosure::Enclosure;
use crate::interval::{dyadic_floor, rational_sqrt_upper, Interval};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, Zero};

/// Positive rational lower bound on the minimal distance between two
/// distinct roots of a squarefree primitive integer polynomial.
///
/// Uses Mahler's discriminant bound with `|disc| >= 1` (the discriminant
/// of a squarefree integer polynomial is a nonzero integer):
/// `sep > sqrt(3) * d^(-(d+2)/2) * |p|_2^(-(d-1))`, weakened to the
/// all-integer form `1 / (d^ceil((d+3)/2) * (isqrt(|p|_2^2) + 1)^(d-1))`.
pub fn separation_lower_bound(p: &IntPoly) -> BigRational {
    let d = p.degree();
    debug_assert!(d >= 1, "separation bound of a constant");
    if d == 1 {
        // A single root is separated from nothing.
        return BigRational::one();
    }
    let exp = ((d + 4) / 2) as u32;
    let norm_above = p.norm2_sq().sqrt() + 1u32;
    let denom = BigInt::from(d).pow(exp) * norm_above.pow((d - 1) as u32);
    BigRational::new(BigInt::one(), denom)
}

/// An exact rational point in the complex plane; the midpoint currency of
/// the Weierstrass iteration.
#[derive(Clone, Debug)]
struct CPoint {
    re: BigRational,
    im: BigRational,
}

impl CPoint {
    fn new(re: BigRational, im: BigRational) -> Self {
        Self { re, im }
    }

    fn zero() -> Self {
        Self::new(BigRational::zero(), BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// Round both components down onto the `2^-prec` grid.
    ///
    /// Midpoints carry no containment obligation, so one-sided rounding
    /// is as good as any.
    fn round(&self, prec: u32) -> Self {
        Self::new(dyadic_floor(&self.re, prec), dyadic_floor(&self.im, prec))
    }

    fn sub(&self, rhs: &Self) -> Self {
        Self::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self::new(
            &self.re * &rhs.re - &self.im * &rhs.im,
            &self.re * &rhs.im + &self.im * &rhs.re,
        )
    }

    fn div(&self, rhs: &Self) -> Option<Self> {
        let den = &rhs.re * &rhs.re + &rhs.im * &rhs.im;
        if den.is_zero() {
            return None;
        }
        let num = self.mul(&Self::new(rhs.re.clone(), -&rhs.im));
        Some(Self::new(num.re / &den, num.im / &den))
    }

    fn norm1(&self) -> BigRational {
        self.re.abs() + self.im.abs()
    }

    /// Exact squared Euclidean norm.
    fn norm2_sq(&self) -> BigRational {
        &self.re * &self.re + &self.im * &self.im
    }
}

/// Exact complex Horner evaluation of an integer polynomial.
fn eval_exact(p: &IntPoly, z: &CPoint) -> CPoint {
    let mut acc = CPoint::zero();
    for c in p.coeffs().iter().rev() {
        acc = acc.mul(z);
        acc.re += BigRational::from_integer(c.clone());
    }
    acc
}

/// Exact evaluation of `p` at the rational point `re + im*i`.
pub(crate) fn eval_at_point(
    p: &IntPoly,
    re: &BigRational,
    im: &BigRational,
) -> (BigRational, BigRational) {
    let v = eval_exact(p, &CPoint::new(re.clone(), im.clone()));
    (v.re, v.im)
}

/// A disc certified to contain exactly one root of some polynomial.
#[derive(Clone, Debug)]
pub(crate) struct RootDisc {
    /// Disc center, real part.
    pub re: BigRational,
    /// Disc center, imaginary part.
    pub im: BigRational,
    /// Certified radius: the nearest root is within this distance.
    pub radius: BigRational,
}

impl RootDisc {
    /// Bounding box of the disc, as a complex enclosure.
    pub fn to_box(&self) -> Enclosure {
        Enclosure::new(
            Interval::centered(&self.re, &self.radius),
            Interval::centered(&self.im, &self.radius),
        )
    }

    /// Exact squared distance between two disc centers.
    fn center_dist_sq(&self, other: &Self) -> BigRational {
        let dr = &self.re - &other.re;
        let di = &self.im - &other.im;
        &dr * &dr + &di * &di
    }
}

/// Approximate all roots of a squarefree polynomial with certified,
/// pairwise disjoint discs.
///
/// Returns `None` when the iterate cannot be certified at this precision;
/// the caller escalates and retries. `Some` discs satisfy, provably:
/// each disc contains at least one root (nearest-root bound from exact
/// evaluation), and the discs are pairwise disjoint, so each contains
/// exactly one and all `deg p` roots are covered.
pub(crate) fn certified_root_discs(p: &IntPoly, prec: u32) -> Option<Vec<RootDisc>> {
    let d = p.degree();
    debug_assert!(d >= 1);
    if d == 1 {
        let root = BigRational::new(-p.coeff(0), p.coeff(1));
        return Some(vec![RootDisc {
            re: root,
            im: BigRational::zero(),
            radius: BigRational::zero(),
        }]);
    }

    let wp = prec.saturating_add(32);
    let eps = BigRational::new(BigInt::one(), BigInt::one() << prec);
    let lc = CPoint::new(
        BigRational::from_integer(p.leading_coeff().clone()),
        BigRational::zero(),
    );

    // Seeds: powers of 2/5 + 9/10 i, which avoid the real axis (a real
    // seed of a real polynomial stays real forever).
    let base = CPoint::new(
        BigRational::new(BigInt::from(2), BigInt::from(5)),
        BigRational::new(BigInt::from(9), BigInt::from(10)),
    );
    let mut roots = Vec::with_capacity(d);
    let mut cur = base.clone();
    for _ in 0..d {
        roots.push(cur.clone());
        cur = cur.mul(&base).round(wp);
    }

    let max_passes = 200 + 4 * d;
    for pass in 0..max_passes {
        let mut converged = true;
        for k in 0..d {
            let value = eval_exact(p, &roots[k]).round(wp);
            if value.is_zero() {
                continue;
            }
            let mut den = lc.clone();
            for j in 0..d {
                if j != k {
                    den = den.mul(&roots[k].sub(&roots[j])).round(wp);
                }
            }
            let step = match value.div(&den) {
                Some(s) => s.round(wp),
                None => {
                    // Collided iterates: nudge and keep going.
                    let nudge = BigRational::new(
                        BigInt::one(),
                        BigInt::from(3) << (pass as u32 % 24),
                    );
                    roots[k] = CPoint::new(&roots[k].re + &nudge, &roots[k].im + &nudge);
                    converged = false;
                    continue;
                }
            };
            if step.norm1() >= eps {
                converged = false;
            }
            roots[k] = roots[k].sub(&step).round(wp);
        }
        if converged && pass > 0 {
            break;
        }
    }

    certify(p, &roots, wp)
}

/// Exact a posteriori certification of an approximate root set.
fn certify(p: &IntPoly, roots: &[CPoint], prec: u32) -> Option<Vec<RootDisc>> {
    let d = p.degree();
    let deriv = p.derivative();
    let dd = BigRational::from_integer(BigInt::from(d));
    let mut discs = Vec::with_capacity(d);
    for c in roots {
        let value = eval_exact(p, c);
        let slope = eval_exact(&deriv, c);
        let slope_sq = slope.norm2_sq();
        if slope_sq.is_zero() {
            return None;
        }
        // Nearest-root bound: some root lies within d * |p(c) / p'(c)|.
        let r_sq = &dd * &dd * value.norm2_sq() / slope_sq;
        let radius = rational_sqrt_upper(&r_sq, prec);
        discs.push(RootDisc {
            re: c.re.clone(),
            im: c.im.clone(),
            radius,
        });
    }
    for j in 0..d {
        for k in 0..j {
            let gap = &discs[j].radius + &discs[k].radius;
            if discs[j].center_dist_sq(&discs[k]) <= &gap * &gap {
                return None;
            }
        }
    }
    Some(discs)
}
