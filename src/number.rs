//! Algebraic numbers as minimal polynomial plus isolating enclosure.
//!
//! The representation is the classical one for exact computation over the
//! algebraic closure of the rationals: a number is a canonical integer
//! polynomial together with a complex box isolating exactly one of its
//! roots. All predicates on values reduce to exact polynomial arithmetic
//! plus finite enclosure refinement, so nothing here is approximate.
//!
//! ## Invariants
//!
//! - `poly` is canonical: primitive, squarefree, positive leading
//!   coefficient, and irreducible (the true minimal polynomial).
//! - `enclosure` contains the value and no other root of `poly`.
//! - Rational values (degree 1) always carry an exact point enclosure.

use crate::enclosure::Enclosure;
use crate::error::{Error, Result};
use crate::interval::{prec_for_target, Interval};
use crate::isolate::{minimal_defining_factor, precision_ladder, refine_enclosure, IsolationConfig};
use crate::poly::roots::{certified_root_discs, separation_lower_bound};
use crate::poly::IntPoly;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// An exact algebraic number.
///
/// Values are compared, combined, and printed through their defining data
/// alone; the enclosure is refined on demand and never trusted beyond what
/// its interval bounds certify.
#[derive(Clone, Debug)]
pub struct AlgebraicNumber {
    poly: IntPoly,
    enclosure: Enclosure,
}

impl AlgebraicNumber {
    /// Build from invariant-upholding parts. Callers guarantee that `poly`
    /// is canonical and minimal and that `enclosure` isolates the value.
    pub(crate) fn from_parts(poly: IntPoly, enclosure: Enclosure) -> Self {
        debug_assert!(poly.degree() >= 1, "defining polynomial must have a root");
        Self { poly, enclosure }
    }

    /// The rational number `v`, with an exact point enclosure.
    pub fn from_rational(v: &BigRational) -> Self {
        Self {
            poly: IntPoly::linear_from_rational(v),
            enclosure: Enclosure::from_rational(v),
        }
    }

    /// The integer `n`.
    pub fn from_integer(n: &BigInt) -> Self {
        Self::from_rational(&BigRational::from_integer(n.clone()))
    }

    /// Zero.
    pub fn zero() -> Self {
        Self::from_rational(&BigRational::zero())
    }

    /// One.
    pub fn one() -> Self {
        Self::from_rational(&BigRational::one())
    }

    /// Minus one.
    pub fn neg_one() -> Self {
        Self::from_rational(&-BigRational::one())
    }

    /// The imaginary unit, the root of `x^2 + 1` in the upper half plane.
    pub fn i() -> Self {
        let poly = IntPoly::from_i64(&[1, 0, 1]);
        let enclosure = Enclosure::new(Interval::zero(), Interval::point(BigRational::one()));
        Self { poly, enclosure }
    }

    /// Define a number as the unique root of `poly` inside `enclosure`.
    ///
    /// `poly` may be any nonzero integer polynomial; it is canonicalized
    /// and then reduced to the minimal polynomial of the enclosed root, so
    /// scaled or reducible inputs all yield the same value. The box is
    /// checked: it must contain exactly one root, counted after squarefree
    /// reduction, with both box bounds treated as inclusive.
    pub fn with_enclosure(poly: IntPoly, enclosure: Enclosure) -> Result<Self> {
        if poly.is_zero() {
            return Err(Error::ZeroPolynomial);
        }
        let canon = poly.canonical();
        if canon.is_constant() {
            // A nonzero constant has no roots anywhere.
            return Err(Error::NoRootInEnclosure);
        }
        let cfg = IsolationConfig::default();
        let located = locate_unique_root(&canon, &enclosure, &cfg)?;
        let (minimal, enc) = minimal_defining_factor(&canon, &located, &cfg);
        Ok(Self::from_parts(minimal, enc))
    }

    /// The principal `n`-th root of a nonnegative rational.
    ///
    /// Returns the unique nonnegative real `w` with `w^n = v`, reduced to
    /// its minimal polynomial (so eighth roots of perfect powers come out
    /// rational). Panics when `v` is negative or `n` is zero.
    pub fn nth_root_of_rational(v: &BigRational, n: u32) -> Self {
        assert!(n >= 1, "zeroth root is undefined");
        assert!(!v.is_negative(), "principal root of a negative rational");
        if v.is_zero() {
            return Self::zero();
        }
        if n == 1 {
            return Self::from_rational(v);
        }
        // Root of den * x^n - num, isolated among the n complex roots by
        // the exact zero imaginary part plus nonnegative real part.
        let mut coeffs = vec![BigInt::zero(); n as usize + 1];
        coeffs[0] = -v.numer().clone();
        coeffs[n as usize] = v.denom().clone();
        let candidate = IntPoly::new(coeffs).canonical();
        let cfg = IsolationConfig::default();
        let re = Interval::point(v.clone()).nth_root(n, cfg.initial_prec);
        let bx = Enclosure::new(re, Interval::zero());
        let (minimal, enc) = minimal_defining_factor(&candidate, &bx, &cfg);
        Self::from_parts(minimal, enc)
    }

    /// The principal square root of a nonnegative rational.
    ///
    /// Shorthand for [`Self::nth_root_of_rational`] with `n = 2`.
    pub fn sqrt_of_rational(v: &BigRational) -> Self {
        Self::nth_root_of_rational(v, 2)
    }

    /// The minimal polynomial (canonical, irreducible).
    #[inline]
    pub fn minimal_polynomial(&self) -> &IntPoly {
        &self.poly
    }

    /// Coefficients of the minimal polynomial, low-to-high.
    #[inline]
    pub fn coefficients(&self) -> &[BigInt] {
        self.poly.coeffs()
    }

    /// The current isolating enclosure.
    #[inline]
    pub fn enclosure(&self) -> &Enclosure {
        &self.enclosure
    }

    /// The algebraic degree, `1` exactly for rationals.
    #[inline]
    pub fn degree(&self) -> usize {
        self.poly.degree()
    }

    /// Whether this is exactly zero. Constant time.
    pub fn is_zero(&self) -> bool {
        self.poly.degree() == 1 && self.poly.coeff(0).is_zero()
    }

    /// Whether this is exactly one. Constant time.
    pub fn is_one(&self) -> bool {
        self.poly.coeffs() == [BigInt::from(-1), BigInt::one()]
    }

    /// Whether this is exactly minus one. Constant time.
    pub fn is_neg_one(&self) -> bool {
        self.poly.coeffs() == [BigInt::one(), BigInt::one()]
    }

    /// Whether the value is rational.
    #[inline]
    pub fn is_rational(&self) -> bool {
        self.poly.degree() == 1
    }

    /// The exact rational value, when the degree is 1.
    pub fn to_rational(&self) -> Option<BigRational> {
        if self.poly.degree() != 1 {
            return None;
        }
        Some(BigRational::new(-self.poly.coeff(0), self.poly.coeff(1)))
    }

    /// Whether the value is a rational integer.
    pub fn is_integer(&self) -> bool {
        self.poly.degree() == 1 && self.poly.coeff(1).is_one()
    }

    /// The exact integer value, when there is one.
    pub fn to_integer(&self) -> Option<BigInt> {
        if self.is_integer() {
            Some(-self.poly.coeff(0))
        } else {
            None
        }
    }

    /// Whether the value is real. Exact: decided by refining the enclosure
    /// below half the root separation bound, where a zero-straddling
    /// imaginary interval certifies a real root (non-real roots pair with
    /// their conjugates at twice their imaginary height).
    pub fn is_real(&self) -> bool {
        if self.enclosure.im().is_zero_point() {
            return true;
        }
        if self.poly.degree() == 1 {
            return true;
        }
        let sep = separation_lower_bound(&self.poly);
        let prec = prec_for_target(&half(&sep));
        let bx = refine_enclosure(&self.poly, &self.enclosure, prec);
        bx.im().contains_zero()
    }

    /// Tighten the stored enclosure to diameter at most `2^-prec`.
    pub fn refine(&mut self, prec: u32) {
        self.enclosure = refine_enclosure(&self.poly, &self.enclosure, prec);
    }

    /// A freshly refined enclosure at `prec`, leaving the number unchanged.
    pub(crate) fn box_at(&self, prec: u32) -> Enclosure {
        refine_enclosure(&self.poly, &self.enclosure, prec)
    }

    /// Pin the imaginary part to an exact zero point when the value is
    /// known real; keeps later real-only decisions constant time.
    pub(crate) fn pinned_real(mut self) -> Self {
        if !self.enclosure.im().is_zero_point() && self.is_real() {
            self.enclosure = Enclosure::new(self.enclosure.re().clone(), Interval::zero());
        }
        self
    }

    /// `f64` approximation of the current enclosure midpoint.
    pub fn approx_f64(&self) -> (f64, f64) {
        self.enclosure.approx_f64()
    }
}

impl From<i64> for AlgebraicNumber {
    fn from(n: i64) -> Self {
        Self::from_rational(&BigRational::from_integer(BigInt::from(n)))
    }
}

impl From<BigInt> for AlgebraicNumber {
    fn from(n: BigInt) -> Self {
        Self::from_integer(&n)
    }
}

impl From<BigRational> for AlgebraicNumber {
    fn from(v: BigRational) -> Self {
        Self::from_rational(&v)
    }
}

impl PartialEq for AlgebraicNumber {
    /// Exact semantic equality: same minimal polynomial and same root.
    ///
    /// Two roots of one squarefree polynomial are either identical or at
    /// least the separation bound apart, so refining both enclosures below
    /// half that bound makes intersection equivalent to equality.
    fn eq(&self, other: &Self) -> bool {
        if self.poly != other.poly {
            return false;
        }
        if self.poly.degree() == 1 {
            return true;
        }
        let sep = separation_lower_bound(&self.poly);
        let prec = prec_for_target(&half(&sep));
        let a = refine_enclosure(&self.poly, &self.enclosure, prec);
        let b = refine_enclosure(&other.poly, &other.enclosure, prec);
        a.intersect(&b).is_some()
    }
}

impl Eq for AlgebraicNumber {}

impl fmt::Display for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (re, im) = self.enclosure.approx_f64();
        if self.enclosure.im().is_zero_point() {
            write!(f, "{:.5} (deg {})", re, self.degree())
        } else if im < 0.0 {
            write!(f, "{:.5} - {:.5}*I (deg {})", re, -im, self.degree())
        } else {
            write!(f, "{:.5} + {:.5}*I (deg {})", re, im, self.degree())
        }
    }
}

fn half(v: &BigRational) -> BigRational {
    v / BigRational::from_integer(BigInt::from(2))
}

enum Hit {
    In,
    Out,
    Unknown,
}

/// Componentwise membership of a root range inside a box side.
fn side_membership(range: &Interval, side: &Interval) -> Hit {
    if side.contains_interval(range) {
        Hit::In
    } else if range.intersect(side).is_none() {
        Hit::Out
    } else {
        Hit::Unknown
    }
}

/// Validate that `bx` contains exactly one root of the canonical `canon`,
/// returning a tightened isolating sub-box of `bx` around it.
///
/// Both bounds of the box count as inside. Certified root discs decide
/// membership for every root cleanly interior or exterior; real roots
/// sitting exactly on a rational bound are resolved by exact evaluation.
/// Non-real roots placed exactly on a box bound never classify and run
/// the ladder to its cap.
fn locate_unique_root(
    canon: &IntPoly,
    bx: &Enclosure,
    cfg: &IsolationConfig,
) -> Result<Enclosure> {
    let sep = separation_lower_bound(canon);
    let lc_inv = BigRational::new(BigInt::one(), canon.leading_coeff().clone());
    let companion = canon.monic_scaled();
    let zero = BigRational::zero();
    for prec in precision_ladder(cfg) {
        let Some(discs) = certified_root_discs(&companion, prec) else {
            continue;
        };
        let scaled: Vec<Enclosure> = discs
            .iter()
            .map(|disc| disc.to_box().scale_rational(&lc_inv))
            .collect();
        let max_radius = discs
            .iter()
            .map(|disc| &disc.radius)
            .max()
            .cloned()
            .unwrap_or_else(BigRational::zero)
            * &lc_inv;
        // Conjugate pairing: a non-real root sits at least half the
        // separation above the axis, so small discs straddling the axis
        // must hold real roots.
        let reals_resolved = &max_radius * BigRational::from_integer(BigInt::from(4)) < sep;

        let mut inside: Vec<usize> = Vec::new();
        let mut unknown = false;
        for (k, root_box) in scaled.iter().enumerate() {
            let certainly_real = reals_resolved && root_box.im().contains_zero();
            let im_hit = if certainly_real {
                if bx.im().contains(&zero) {
                    Hit::In
                } else {
                    Hit::Out
                }
            } else {
                side_membership(root_box.im(), bx.im())
            };
            let mut re_hit = side_membership(root_box.re(), bx.re());
            if certainly_real && matches!(re_hit, Hit::Unknown) {
                // The root may lie exactly on a rational bound of the box;
                // that is decidable by exact evaluation.
                for bound in [bx.re().lo(), bx.re().hi()] {
                    if root_box.re().contains(bound) && canon.eval_rational(bound).is_zero() {
                        re_hit = Hit::In;
                        break;
                    }
                }
            }
            match (re_hit, im_hit) {
                (Hit::In, Hit::In) => inside.push(k),
                (Hit::Out, _) | (_, Hit::Out) => {}
                _ => unknown = true,
            }
        }

        if inside.len() >= 2 {
            return Err(Error::AmbiguousEnclosure);
        }
        if unknown {
            continue;
        }
        let Some(&k) = inside.first() else {
            return Err(Error::NoRootInEnclosure);
        };
        if !reals_resolved {
            // The owning disc's bounding box may still reach a second
            // root; below a quarter of the separation bound it cannot.
            continue;
        }
        // Both the box and the owning disc contain the root, so the
        // intersection does too and stays isolating.
        return match bx.intersect(&scaled[k]) {
            Some(enc) => Ok(enc),
            None => unreachable!("the enclosed root lies in both boxes"),
        };
    }
    panic!("enclosure validation exceeded the precision cap");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn real_box(lo: BigRational, hi: BigRational) -> Enclosure {
        Enclosure::new(Interval::new(lo, hi), Interval::zero())
    }

    #[test]
    fn rational_constructors_collapse_to_degree_one() {
        let x = AlgebraicNumber::from_rational(&rat(-7, 3));
        assert_eq!(x.degree(), 1);
        assert_eq!(x.to_rational(), Some(rat(-7, 3)));
        assert_eq!(x.coefficients(), [BigInt::from(7), BigInt::from(3)]);
        assert!(x.enclosure().re().is_point());
        assert!(!x.is_integer());

        let n = AlgebraicNumber::from(42i64);
        assert!(n.is_integer());
        assert_eq!(n.to_integer(), Some(BigInt::from(42)));
    }

    #[test]
    fn constant_recognizers() {
        assert!(AlgebraicNumber::zero().is_zero());
        assert!(AlgebraicNumber::one().is_one());
        assert!(AlgebraicNumber::neg_one().is_neg_one());
        assert!(!AlgebraicNumber::one().is_zero());
        let i = AlgebraicNumber::i();
        assert_eq!(i.degree(), 2);
        assert!(!i.is_real());
    }

    #[test]
    fn with_enclosure_defines_sqrt2() {
        let x = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-2, 0, 1]),
            real_box(rat(1, 1), rat(3, 2)),
        )
        .unwrap();
        assert_eq!(x.degree(), 2);
        assert_eq!(x.minimal_polynomial(), &IntPoly::from_i64(&[-2, 0, 1]));
        assert!(x.is_real());
        assert!(x.to_rational().is_none());
        assert_eq!(x, AlgebraicNumber::sqrt_of_rational(&rat(2, 1)));
    }

    #[test]
    fn with_enclosure_is_scaling_independent() {
        // 6x^2 - 12 defines the same number as x^2 - 2.
        let a = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-12, 0, 6]),
            real_box(rat(1, 1), rat(3, 2)),
        )
        .unwrap();
        let b = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-2, 0, 1]),
            real_box(rat(5, 4), rat(29, 20)),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn with_enclosure_reduces_to_minimal_factor() {
        // x^2 - 4 around 2 collapses to the rational 2.
        let x = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-4, 0, 1]),
            real_box(rat(3, 2), rat(5, 2)),
        )
        .unwrap();
        assert_eq!(x.to_integer(), Some(BigInt::from(2)));
        assert!(x.enclosure().re().is_point());
    }

    #[test]
    fn with_enclosure_accepts_root_on_the_bound() {
        // 2 is a root of x^2 - 4 and also the upper bound of the box.
        let x = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-4, 0, 1]),
            real_box(rat(0, 1), rat(2, 1)),
        )
        .unwrap();
        assert_eq!(x.to_integer(), Some(BigInt::from(2)));
    }

    #[test]
    fn with_enclosure_rejects_bad_inputs() {
        let p = IntPoly::from_i64(&[-2, 0, 1]);
        assert_eq!(
            AlgebraicNumber::with_enclosure(IntPoly::zero(), real_box(rat(0, 1), rat(1, 1))),
            Err(Error::ZeroPolynomial)
        );
        assert_eq!(
            AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[5]), real_box(rat(0, 1), rat(1, 1))),
            Err(Error::NoRootInEnclosure)
        );
        assert_eq!(
            AlgebraicNumber::with_enclosure(p.clone(), real_box(rat(5, 1), rat(6, 1))),
            Err(Error::NoRootInEnclosure)
        );
        assert_eq!(
            AlgebraicNumber::with_enclosure(p, real_box(rat(-2, 1), rat(2, 1))),
            Err(Error::AmbiguousEnclosure)
        );
    }

    #[test]
    fn nth_root_of_rational_reduces_perfect_powers() {
        let two = AlgebraicNumber::nth_root_of_rational(&rat(4, 1), 2);
        assert_eq!(two.to_integer(), Some(BigInt::from(2)));

        let r = AlgebraicNumber::nth_root_of_rational(&rat(2, 1), 3);
        assert_eq!(r.degree(), 3);
        assert_eq!(r.minimal_polynomial(), &IntPoly::from_i64(&[-2, 0, 0, 1]));
        assert!(r.is_real());

        let half = AlgebraicNumber::nth_root_of_rational(&rat(1, 8), 3);
        assert_eq!(half.to_rational(), Some(rat(1, 2)));
    }

    #[test]
    fn equality_is_semantic() {
        let a = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-2, 0, 1]),
            real_box(rat(1, 1), rat(2, 1)),
        )
        .unwrap();
        let mut b = a.clone();
        b.refine(80);
        assert_eq!(a, b);

        let neg = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-2, 0, 1]),
            real_box(rat(-2, 1), rat(-1, 1)),
        )
        .unwrap();
        assert_ne!(a, neg);
        assert_ne!(a, AlgebraicNumber::from(2i64));
    }

    #[test]
    fn display_shows_approximation_and_degree() {
        let x = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-2, 0, 1]),
            real_box(rat(1, 1), rat(3, 2)),
        )
        .unwrap();
        let shown = format!("{x}");
        assert!(shown.starts_with("1.4142"), "got {shown}");
        assert!(shown.ends_with("(deg 2)"), "got {shown}");
        assert_eq!(format!("{}", AlgebraicNumber::i()), "0.00000 + 1.00000*I (deg 2)");
    }

    #[test]
    fn refine_tightens_the_stored_box() {
        let mut x = AlgebraicNumber::with_enclosure(
            IntPoly::from_i64(&[-2, 0, 1]),
            real_box(rat(1, 1), rat(2, 1)),
        )
        .unwrap();
        x.refine(100);
        let target = BigRational::new(BigInt::one(), BigInt::one() << 100);
        assert!(x.enclosure().diam_bound() <= target);
        assert!(x.enclosure().mul(x.enclosure(), 128).contains_rational(&rat(2, 1)));
    }
}
