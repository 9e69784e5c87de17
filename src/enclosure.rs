//! Complex interval boxes.
//!
//! An [`Enclosure`] is an axis-aligned rectangle in the complex plane,
//! stored as independent real and imaginary [`Interval`]s. Boxes are the
//! numeric half of an algebraic number: they never carry exact information
//! beyond containment, and every box operation here preserves containment
//! of the exact complex image. Precision only controls tightness.
//!
//! Exactness does flow in one direction: a value known to be real keeps a
//! degenerate `[0, 0]` imaginary interval through the exact operations
//! (negation, conjugation), so realness is never lost to rounding.

use crate::interval::Interval;
use num_rational::BigRational;
use num_traits::One;
use std::fmt;

/// An axis-aligned complex box known to contain one exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    /// Real-part interval.
    re: Interval,
    /// Imaginary-part interval.
    im: Interval,
}

impl Enclosure {
    /// Create a box from real and imaginary intervals.
    pub fn new(re: Interval, im: Interval) -> Self {
        Self { re, im }
    }

    /// Degenerate box around an exact rational point on the real line.
    pub fn from_rational(v: &BigRational) -> Self {
        Self {
            re: Interval::point(v.clone()),
            im: Interval::zero(),
        }
    }

    /// Degenerate box around an exact point `re + im*i`.
    pub fn from_rational_pair(re: &BigRational, im: &BigRational) -> Self {
        Self {
            re: Interval::point(re.clone()),
            im: Interval::point(im.clone()),
        }
    }

    /// The degenerate box around zero.
    pub fn zero() -> Self {
        Self {
            re: Interval::zero(),
            im: Interval::zero(),
        }
    }

    /// Real-part interval.
    #[inline]
    pub fn re(&self) -> &Interval {
        &self.re
    }

    /// Imaginary-part interval.
    #[inline]
    pub fn im(&self) -> &Interval {
        &self.im
    }

    /// Midpoint of the box as a rational point `(re, im)`.
    pub fn midpoint(&self) -> (BigRational, BigRational) {
        (self.re.midpoint(), self.im.midpoint())
    }

    /// Rational upper bound on the distance between any two box points.
    ///
    /// Uses the L1 form `width(re) + width(im)`, which dominates the
    /// Euclidean diameter and compares cleanly against separation bounds.
    pub fn diam_bound(&self) -> BigRational {
        self.re.width() + self.im.width()
    }

    /// Whether the box contains `0`.
    pub fn contains_zero(&self) -> bool {
        self.re.contains_zero() && self.im.contains_zero()
    }

    /// Whether every point of the box is nonzero.
    #[inline]
    pub fn excludes_zero(&self) -> bool {
        !self.contains_zero()
    }

    /// Whether the box contains the point `re + im*i`.
    pub fn contains_point(&self, re: &BigRational, im: &BigRational) -> bool {
        self.re.contains(re) && self.im.contains(im)
    }

    /// Whether the box contains the real rational `v`.
    pub fn contains_rational(&self, v: &BigRational) -> bool {
        self.re.contains(v) && self.im.contains_zero()
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains_enclosure(&self, other: &Self) -> bool {
        self.re.contains_interval(&other.re) && self.im.contains_interval(&other.im)
    }

    /// Componentwise intersection, `None` when the boxes are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Some(Self {
            re: self.re.intersect(&other.re)?,
            im: self.im.intersect(&other.im)?,
        })
    }

    /// Smallest box containing both operands.
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            re: self.re.hull(&other.re),
            im: self.im.hull(&other.im),
        }
    }

    /// Exact complex conjugate (mirror across the real axis).
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: self.im.neg(),
        }
    }

    /// Exact negation.
    pub fn neg(&self) -> Self {
        Self {
            re: self.re.neg(),
            im: self.im.neg(),
        }
    }

    /// Round both component intervals outward onto the `2^-prec` grid.
    pub fn round_out(&self, prec: u32) -> Self {
        Self {
            re: self.re.round_out(prec),
            im: self.im.round_out(prec),
        }
    }

    /// Exact scaling by a real rational factor.
    pub fn scale_rational(&self, c: &BigRational) -> Self {
        Self {
            re: self.re.scale_rational(c),
            im: self.im.scale_rational(c),
        }
    }

    /// Box sum at `prec`.
    pub fn add(&self, rhs: &Self, prec: u32) -> Self {
        Self {
            re: self.re.add(&rhs.re, prec),
            im: self.im.add(&rhs.im, prec),
        }
    }

    /// Box difference at `prec`.
    pub fn sub(&self, rhs: &Self, prec: u32) -> Self {
        Self {
            re: self.re.sub(&rhs.re, prec),
            im: self.im.sub(&rhs.im, prec),
        }
    }

    /// Box product at `prec`.
    pub fn mul(&self, rhs: &Self, prec: u32) -> Self {
        let ac = self.re.mul(&rhs.re, prec);
        let bd = self.im.mul(&rhs.im, prec);
        let ad = self.re.mul(&rhs.im, prec);
        let bc = self.im.mul(&rhs.re, prec);
        Self {
            re: ac.sub(&bd, prec),
            im: ad.add(&bc, prec),
        }
    }

    /// Box `n`-th power at `prec`; `n = 0` gives the exact point `1`.
    pub fn powi(&self, n: u32, prec: u32) -> Self {
        let mut acc = Self::from_rational(&BigRational::one());
        if n == 0 {
            return acc;
        }
        let mut base = self.clone();
        let mut k = n;
        while k > 1 {
            if k & 1 == 1 {
                acc = acc.mul(&base, prec);
            }
            base = base.mul(&base, prec);
            k >>= 1;
        }
        acc.mul(&base, prec)
    }

    /// Box quotient at `prec`.
    ///
    /// `None` when the squared-magnitude interval of the divisor still
    /// contains zero; the caller escalates the divisor's precision.
    pub fn checked_div(&self, rhs: &Self, prec: u32) -> Option<Self> {
        let den = rhs.re.sqr(prec).add(&rhs.im.sqr(prec), prec);
        if den.contains_zero() {
            return None;
        }
        let num = self.mul(&rhs.conj(), prec);
        Some(Self {
            re: num.re.checked_div(&den, prec)?,
            im: num.im.checked_div(&den, prec)?,
        })
    }

    /// Box containing the principal square root of every box point.
    ///
    /// Decidable only when the box avoids the branch cut: the real part is
    /// strictly positive, or the imaginary part has a certified sign.
    /// Returns `None` otherwise (the caller refines the operand, or handles
    /// a known-real negative value itself).
    pub fn principal_sqrt(&self, prec: u32) -> Option<Self> {
        let a = &self.re;
        let b = &self.im;
        // |z| from |z|^2 = a^2 + b^2, all nonnegative by construction.
        let mag = a.sqr(prec).add(&b.sqr(prec), prec).sqrt(prec);
        let half_sum = mag.add(a, prec).halve().nonneg_part();
        if a.is_strictly_positive() {
            // Right half plane: re = sqrt((|z|+a)/2) > 0, im = b / (2 re).
            let re_s = half_sum.sqrt(prec);
            let im_s = b.checked_div(&re_s.add(&re_s, prec), prec)?;
            Some(Self { re: re_s, im: im_s })
        } else if b.is_strictly_positive() {
            let half_diff = mag.sub(a, prec).halve().nonneg_part();
            Some(Self {
                re: half_sum.sqrt(prec),
                im: half_diff.sqrt(prec),
            })
        } else if b.is_strictly_negative() {
            let half_diff = mag.sub(a, prec).halve().nonneg_part();
            Some(Self {
                re: half_sum.sqrt(prec),
                im: half_diff.sqrt(prec).neg(),
            })
        } else {
            None
        }
    }

    /// `f64` approximation of the midpoint, for display and seeding only.
    pub fn approx_f64(&self) -> (f64, f64) {
        (self.re.approx_f64(), self.im.approx_f64())
    }
}

impl fmt::Display for Enclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}*I", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn box_around(re_lo: (i64, i64), re_hi: (i64, i64), im_lo: (i64, i64), im_hi: (i64, i64)) -> Enclosure {
        Enclosure::new(
            Interval::new(rat(re_lo.0, re_lo.1), rat(re_hi.0, re_hi.1)),
            Interval::new(rat(im_lo.0, im_lo.1), rat(im_hi.0, im_hi.1)),
        )
    }

    #[test]
    fn mul_squares_one_plus_i() {
        // (1 + i)^2 = 2i.
        let z = Enclosure::from_rational_pair(&BigRational::one(), &BigRational::one());
        let sq = z.mul(&z, 32);
        assert!(sq.contains_point(&rat(0, 1), &rat(2, 1)));
    }

    #[test]
    fn powi_tracks_powers_of_one_plus_i() {
        // (1 + i)^4 = -4.
        let z = Enclosure::from_rational_pair(&BigRational::one(), &BigRational::one());
        let p = z.powi(4, 32);
        assert!(p.contains_point(&rat(-4, 1), &rat(0, 1)));
        assert_eq!(z.powi(0, 32), Enclosure::from_rational(&BigRational::one()));
    }

    #[test]
    fn conj_and_neg_are_exact() {
        let z = box_around((1, 2), (2, 3), (1, 5), (1, 4));
        let c = z.conj();
        assert_eq!(c.re(), z.re());
        assert_eq!(c.im().lo(), &rat(-1, 4));
        assert_eq!(c.im().hi(), &rat(-1, 5));
        let n = z.neg();
        assert_eq!(n.re().lo(), &rat(-2, 3));
        assert_eq!(n.im().hi(), &rat(-1, 5));
    }

    #[test]
    fn real_values_keep_exact_zero_imaginary_part() {
        let x = Enclosure::from_rational(&rat(7, 3));
        assert!(x.im().is_zero_point());
        assert!(x.conj().im().is_zero_point());
        assert!(x.neg().im().is_zero_point());
    }

    #[test]
    fn checked_div_demands_nonzero_divisor() {
        let one = Enclosure::from_rational(&rat(1, 1));
        let fuzzy_zero = box_around((-1, 8), (1, 8), (-1, 8), (1, 8));
        assert!(one.checked_div(&fuzzy_zero, 32).is_none());
        let two = Enclosure::from_rational(&rat(2, 1));
        let q = one.checked_div(&two, 32).unwrap();
        assert!(q.contains_rational(&rat(1, 2)));
    }

    #[test]
    fn principal_sqrt_of_two_brackets_root_two() {
        let two = Enclosure::from_rational(&rat(2, 1));
        let s = two.principal_sqrt(48).unwrap();
        assert!(s.re().is_strictly_positive());
        let sq = s.mul(&s, 48);
        assert!(sq.contains_rational(&rat(2, 1)));
        assert!(s.diam_bound() < rat(1, 1_000_000));
    }

    #[test]
    fn principal_sqrt_of_two_i_is_one_plus_i() {
        // sqrt(2i) = 1 + i.
        let z = Enclosure::from_rational_pair(&rat(0, 1), &rat(2, 1));
        let s = z.principal_sqrt(48).unwrap();
        assert!(s.contains_point(&rat(1, 1), &rat(1, 1)));
    }

    #[test]
    fn principal_sqrt_refuses_branch_cut_straddle() {
        // Negative real part with sign-ambiguous imaginary part.
        let z = box_around((-3, 1), (-2, 1), (-1, 16), (1, 16));
        assert!(z.principal_sqrt(32).is_none());
    }

    #[test]
    fn diam_bound_dominates_component_widths() {
        let z = box_around((0, 1), (1, 2), (0, 1), (1, 4));
        assert_eq!(z.diam_bound(), rat(3, 4));
    }
}
