//! Arithmetic and ordering on algebraic numbers.
//!
//! Every operation routes through a fixed dispatch order, cheapest first:
//!
//! 1. constant-time recognizer shortcuts (zero, one, minus one),
//! 2. exact rational arithmetic when both operands have degree 1,
//! 3. the radical fast path for products and quotients of signed
//!    principal roots,
//! 4. a rational Möbius transform when exactly one operand is rational,
//! 5. resultant elimination as the general fallback.
//!
//! Division rejects a zero divisor before any other routing: recoverably
//! through [`AlgebraicNumber::checked_div`], by panic through the `/`
//! operator.

mod binary;
mod radical;
mod scalar;

use crate::enclosure::Enclosure;
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::isolate::{isolate_with, minimal_defining_factor, precision_ladder, IsolationConfig};
use crate::number::AlgebraicNumber;
use crate::poly::IntPoly;
use binary::BinOp;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, Zero};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

impl AlgebraicNumber {
    /// Exact division, rejecting a zero divisor as an error.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        div_values(self, rhs)
    }

    /// Exact reciprocal, rejecting zero as an error.
    pub fn checked_recip(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(recip_value(self))
    }

    /// Exact reciprocal. Panics on zero; use
    /// [`AlgebraicNumber::checked_recip`] to recover instead.
    pub fn recip(&self) -> Self {
        match self.checked_recip() {
            Ok(v) => v,
            Err(_) => panic!("reciprocal of zero algebraic number"),
        }
    }

    /// Complex conjugate. Exact and structural: the minimal polynomial has
    /// real coefficients, so it is shared, and the enclosure mirrors.
    pub fn conj(&self) -> Self {
        Self::from_parts(self.minimal_polynomial().clone(), self.enclosure().conj())
    }

    /// Real part, as a real algebraic number.
    pub fn re(&self) -> Self {
        if self.enclosure().im().is_zero_point() {
            return self.clone();
        }
        if self.is_real() {
            return self.clone().pinned_real();
        }
        let doubled = add_values(self, &self.conj());
        let half = Self::from_rational(&BigRational::new(BigInt::one(), BigInt::from(2)));
        mul_values(&doubled, &half).pinned_real()
    }

    /// Imaginary part, as a real algebraic number.
    pub fn im(&self) -> Self {
        if self.enclosure().im().is_zero_point() || self.is_real() {
            return Self::zero();
        }
        // x - conj(x) = 2i * im(x); multiply by -i/2 to extract it.
        let doubled_i = sub_values(self, &self.conj());
        let neg_half_i = Self::from_parts(
            IntPoly::from_i64(&[1, 0, 4]),
            Enclosure::new(
                Interval::zero(),
                Interval::point(BigRational::new(BigInt::from(-1), BigInt::from(2))),
            ),
        );
        mul_values(&doubled_i, &neg_half_i).pinned_real()
    }

    /// Absolute value `|x|`, a nonnegative real algebraic number.
    pub fn abs(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        if self.is_real() {
            return match decided_real_sign(self) {
                Ordering::Less => -self,
                _ => self.clone().pinned_real(),
            };
        }
        // |x| = sqrt(x * conj(x)); the product is real and nonnegative.
        mul_values(self, &self.conj()).sqrt()
    }

    /// Principal square root.
    ///
    /// Nonnegative reals map to their nonnegative root, and the branch cut
    /// follows the usual convention: the result has nonnegative real part,
    /// with negative reals mapping onto the positive imaginary axis.
    pub fn sqrt(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        if let Some(r) = self.to_rational() {
            if !r.is_negative() {
                return Self::nth_root_of_rational(&r, 2);
            }
            // Purely imaginary: i*sqrt(|r|) is a root of den*z^2 + num,
            // irreducible for lack of real roots.
            let mag = -r;
            let poly = IntPoly::new([
                mag.numer().clone(),
                BigInt::zero(),
                mag.denom().clone(),
            ]);
            let prec = IsolationConfig::default().initial_prec;
            let enc = Enclosure::new(Interval::zero(), Interval::point(mag).sqrt(prec));
            return Self::from_parts(poly, enc);
        }
        let real = self.is_real();
        if real && decided_real_sign(self) == Ordering::Less {
            // sqrt(x) = i * sqrt(-x), keeping the real axis exact.
            return mul_values(&Self::i(), &(-self).sqrt());
        }
        let candidate = self.minimal_polynomial().compose_power(2).canonical();
        let cfg = IsolationConfig::default();
        let bx = isolate_with(&candidate, &cfg, |prec| {
            self.box_at(prec).principal_sqrt(prec)
        });
        let (minimal, enc) = minimal_defining_factor(&candidate, &bx, &cfg);
        let out = Self::from_parts(minimal, enc);
        if real {
            out.pinned_real()
        } else {
            out
        }
    }

    /// Principal `n`-th root of a nonnegative real value.
    ///
    /// Panics when `n` is zero or the value is negative or non-real;
    /// complex inputs go through [`AlgebraicNumber::sqrt`] or explicit
    /// polynomial constructions instead.
    pub fn nth_root(&self, n: u32) -> Self {
        assert!(n >= 1, "zeroth root is undefined");
        if n == 1 {
            return self.clone();
        }
        if self.is_zero() {
            return Self::zero();
        }
        if let Some(r) = self.to_rational() {
            assert!(!r.is_negative(), "principal root of a negative value");
            return Self::nth_root_of_rational(&r, n);
        }
        assert!(
            self.is_real() && decided_real_sign(self) == Ordering::Greater,
            "principal root requires a nonnegative real value"
        );
        let candidate = self.minimal_polynomial().compose_power(n).canonical();
        let cfg = IsolationConfig::default();
        let bx = isolate_with(&candidate, &cfg, |prec| {
            let b = self.box_at(prec);
            if !b.re().is_strictly_positive() {
                return None;
            }
            Some(Enclosure::new(b.re().nth_root(n, prec), Interval::zero()))
        });
        let (minimal, enc) = minimal_defining_factor(&candidate, &bx, &cfg);
        Self::from_parts(minimal, enc)
    }

    /// Integer power by squaring, with `x^0 = 1` for every `x` and
    /// negative exponents through the reciprocal.
    ///
    /// Panics when raising zero to a negative power.
    pub fn pow(&self, k: i32) -> Self {
        if k == 0 {
            return Self::one();
        }
        if k < 0 && self.is_zero() {
            panic!("zero raised to a negative power");
        }
        let e = k.unsigned_abs();
        if let Some(r) = self.to_rational() {
            let v = BigRational::new(Pow::pow(r.numer(), e), Pow::pow(r.denom(), e));
            return Self::from_rational(&if k < 0 { v.recip() } else { v });
        }
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = e;
        loop {
            if exp & 1 == 1 {
                result = mul_values(&result, &base);
            }
            exp >>= 1;
            if exp == 0 {
                break;
            }
            base = mul_values(&base, &base);
        }
        if k < 0 {
            recip_value(&result)
        } else {
            result
        }
    }

    /// Largest integer not exceeding a real value.
    ///
    /// Panics on non-real values.
    pub fn floor(&self) -> BigInt {
        if let Some(r) = self.to_rational() {
            return r.floor().to_integer();
        }
        assert!(self.is_real(), "floor of a non-real value");
        let cfg = IsolationConfig::default();
        for prec in precision_ladder(&cfg) {
            let b = self.box_at(prec);
            let lo = b.re().lo().floor();
            if lo == b.re().hi().floor() {
                return lo.to_integer();
            }
        }
        // An irrational value is never an integer, so the enclosure
        // eventually falls inside one integer gap.
        panic!("floor exceeded the precision cap");
    }

    /// Smallest integer not below a real value.
    ///
    /// Panics on non-real values.
    pub fn ceil(&self) -> BigInt {
        if let Some(r) = self.to_rational() {
            return r.ceil().to_integer();
        }
        assert!(self.is_real(), "ceil of a non-real value");
        let cfg = IsolationConfig::default();
        for prec in precision_ladder(&cfg) {
            let b = self.box_at(prec);
            let hi = b.re().hi().ceil();
            if hi == b.re().lo().ceil() {
                return hi.to_integer();
            }
        }
        panic!("ceil exceeded the precision cap");
    }

    /// Compare real parts exactly.
    pub fn cmp_re(&self, other: &Self) -> Ordering {
        // Interval separation settles almost every case cheaply.
        for prec in [64u32, 256] {
            let a = self.box_at(prec);
            let b = other.box_at(prec);
            if a.re().hi() < b.re().lo() {
                return Ordering::Less;
            }
            if b.re().hi() < a.re().lo() {
                return Ordering::Greater;
            }
        }
        real_cmp_to_zero(&sub_values(&self.re(), &other.re()))
    }

    /// Compare imaginary parts exactly.
    pub fn cmp_im(&self, other: &Self) -> Ordering {
        if self.enclosure().im().is_zero_point() && other.enclosure().im().is_zero_point() {
            return Ordering::Equal;
        }
        for prec in [64u32, 256] {
            let a = self.box_at(prec);
            let b = other.box_at(prec);
            if a.im().hi() < b.im().lo() {
                return Ordering::Less;
            }
            if b.im().hi() < a.im().lo() {
                return Ordering::Greater;
            }
        }
        real_cmp_to_zero(&sub_values(&self.im(), &other.im()))
    }

    /// Exact sign of the real part.
    pub fn sign_re(&self) -> Ordering {
        for prec in [64u32, 256] {
            if let Some(sign) = self.box_at(prec).re().decided_sign() {
                return sign;
            }
        }
        real_cmp_to_zero(&self.re())
    }

    /// Exact sign of the imaginary part, `Equal` exactly when the value
    /// is real.
    pub fn sign_im(&self) -> Ordering {
        if self.enclosure().im().is_zero_point() {
            return Ordering::Equal;
        }
        for prec in [64u32, 256] {
            if let Some(sign) = self.box_at(prec).im().decided_sign() {
                return sign;
            }
        }
        real_cmp_to_zero(&self.im())
    }
}

impl Ord for AlgebraicNumber {
    /// Total lexicographic order: real parts first, then imaginary parts.
    /// Restricted to real numbers this is the numeric order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_re(other).then_with(|| self.cmp_im(other))
    }
}

impl PartialOrd for AlgebraicNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sign of a real value, decided by enclosure refinement. Rational values
/// are compared exactly; irrational ones are nonzero and separate from
/// zero at a finite precision. Callers ensure the value is real.
fn decided_real_sign(x: &AlgebraicNumber) -> Ordering {
    if let Some(r) = x.to_rational() {
        return r.cmp(&BigRational::zero());
    }
    let cfg = IsolationConfig::default();
    for prec in precision_ladder(&cfg) {
        if let Some(sign) = x.box_at(prec).re().decided_sign() {
            return sign;
        }
    }
    panic!("sign determination exceeded the precision cap");
}

fn real_cmp_to_zero(x: &AlgebraicNumber) -> Ordering {
    if x.is_zero() {
        Ordering::Equal
    } else {
        decided_real_sign(x)
    }
}

/// Exact negation: reflect the polynomial, mirror the enclosure.
fn neg_value(x: &AlgebraicNumber) -> AlgebraicNumber {
    AlgebraicNumber::from_parts(
        x.minimal_polynomial().reflected().sign_normalized(),
        x.enclosure().neg(),
    )
}

/// Exact reciprocal of a nonzero value.
fn recip_value(x: &AlgebraicNumber) -> AlgebraicNumber {
    debug_assert!(!x.is_zero());
    if let Some(r) = x.to_rational() {
        return AlgebraicNumber::from_rational(&r.recip());
    }
    scalar::apply(x, &scalar::Mobius::recip())
}

fn add_values(x: &AlgebraicNumber, y: &AlgebraicNumber) -> AlgebraicNumber {
    if x.is_zero() {
        return y.clone();
    }
    if y.is_zero() {
        return x.clone();
    }
    match (x.to_rational(), y.to_rational()) {
        (Some(a), Some(b)) => AlgebraicNumber::from_rational(&(a + b)),
        (Some(a), None) => scalar::apply(y, &scalar::Mobius::add_const(&a)),
        (None, Some(b)) => scalar::apply(x, &scalar::Mobius::add_const(&b)),
        (None, None) => binary::combine(BinOp::Add, x, y),
    }
}

fn sub_values(x: &AlgebraicNumber, y: &AlgebraicNumber) -> AlgebraicNumber {
    if y.is_zero() {
        return x.clone();
    }
    if x.is_zero() {
        return -y;
    }
    match (x.to_rational(), y.to_rational()) {
        (Some(a), Some(b)) => AlgebraicNumber::from_rational(&(a - b)),
        (Some(a), None) => scalar::apply(y, &scalar::Mobius::const_sub(&a)),
        (None, Some(b)) => scalar::apply(x, &scalar::Mobius::sub_const(&b)),
        (None, None) => binary::combine(BinOp::Sub, x, y),
    }
}

fn mul_values(x: &AlgebraicNumber, y: &AlgebraicNumber) -> AlgebraicNumber {
    if x.is_zero() || y.is_zero() {
        return AlgebraicNumber::zero();
    }
    if x.is_one() {
        return y.clone();
    }
    if y.is_one() {
        return x.clone();
    }
    if x.is_neg_one() {
        return -y;
    }
    if y.is_neg_one() {
        return -x;
    }
    match (x.to_rational(), y.to_rational()) {
        (Some(a), Some(b)) => AlgebraicNumber::from_rational(&(a * b)),
        (Some(a), None) => scalar::apply(y, &scalar::Mobius::mul_const(&a)),
        (None, Some(b)) => scalar::apply(x, &scalar::Mobius::mul_const(&b)),
        (None, None) => radical::try_mul(x, y)
            .unwrap_or_else(|| binary::combine(BinOp::Mul, x, y)),
    }
}

fn div_values(x: &AlgebraicNumber, y: &AlgebraicNumber) -> Result<AlgebraicNumber> {
    // The divisor is checked before any other routing.
    if y.is_zero() {
        return Err(Error::DivisionByZero);
    }
    if x.is_zero() {
        return Ok(AlgebraicNumber::zero());
    }
    if y.is_one() {
        return Ok(x.clone());
    }
    if y.is_neg_one() {
        return Ok(-x);
    }
    if x.is_one() {
        return Ok(recip_value(y));
    }
    if x.is_neg_one() {
        return Ok(-recip_value(y));
    }
    Ok(match (x.to_rational(), y.to_rational()) {
        (Some(a), Some(b)) => AlgebraicNumber::from_rational(&(a / b)),
        (Some(a), None) => scalar::apply(y, &scalar::Mobius::const_div(&a)),
        (None, Some(b)) => scalar::apply(x, &scalar::Mobius::div_const(&b)),
        (None, None) => radical::try_div(x, y)
            .unwrap_or_else(|| binary::combine(BinOp::Div, x, y)),
    })
}

impl Add<&AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn add(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        add_values(self, rhs)
    }
}

impl Add for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn add(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        add_values(&self, &rhs)
    }
}

impl Add<AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn add(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        add_values(self, &rhs)
    }
}

impl Add<&AlgebraicNumber> for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn add(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        add_values(&self, rhs)
    }
}

impl Sub<&AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn sub(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        sub_values(self, rhs)
    }
}

impl Sub for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn sub(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        sub_values(&self, &rhs)
    }
}

impl Sub<AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn sub(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        sub_values(self, &rhs)
    }
}

impl Sub<&AlgebraicNumber> for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn sub(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        sub_values(&self, rhs)
    }
}

impl Mul<&AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn mul(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        mul_values(self, rhs)
    }
}

impl Mul for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn mul(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        mul_values(&self, &rhs)
    }
}

impl Mul<AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn mul(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        mul_values(self, &rhs)
    }
}

impl Mul<&AlgebraicNumber> for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn mul(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        mul_values(&self, rhs)
    }
}

impl Div<&AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    /// Panics on a zero divisor; use
    /// [`AlgebraicNumber::checked_div`] to recover instead.
    fn div(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        match div_values(self, rhs) {
            Ok(v) => v,
            Err(_) => panic!("division by zero algebraic number"),
        }
    }
}

impl Div for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn div(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        &self / &rhs
    }
}

impl Div<AlgebraicNumber> for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn div(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
        self / &rhs
    }
}

impl Div<&AlgebraicNumber> for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn div(self, rhs: &AlgebraicNumber) -> AlgebraicNumber {
        &self / rhs
    }
}

impl Neg for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn neg(self) -> AlgebraicNumber {
        neg_value(self)
    }
}

impl Neg for AlgebraicNumber {
    type Output = AlgebraicNumber;
    fn neg(self) -> AlgebraicNumber {
        neg_value(&self)
    }
}

impl AddAssign<&AlgebraicNumber> for AlgebraicNumber {
    fn add_assign(&mut self, rhs: &AlgebraicNumber) {
        *self = &*self + rhs;
    }
}

impl AddAssign for AlgebraicNumber {
    fn add_assign(&mut self, rhs: AlgebraicNumber) {
        *self = &*self + &rhs;
    }
}

impl SubAssign<&AlgebraicNumber> for AlgebraicNumber {
    fn sub_assign(&mut self, rhs: &AlgebraicNumber) {
        *self = &*self - rhs;
    }
}

impl SubAssign for AlgebraicNumber {
    fn sub_assign(&mut self, rhs: AlgebraicNumber) {
        *self = &*self - &rhs;
    }
}

impl MulAssign<&AlgebraicNumber> for AlgebraicNumber {
    fn mul_assign(&mut self, rhs: &AlgebraicNumber) {
        *self = &*self * rhs;
    }
}

impl MulAssign for AlgebraicNumber {
    fn mul_assign(&mut self, rhs: AlgebraicNumber) {
        *self = &*self * &rhs;
    }
}

impl DivAssign<&AlgebraicNumber> for AlgebraicNumber {
    /// Panics on a zero divisor, matching the plain `/` operator.
    fn div_assign(&mut self, rhs: &AlgebraicNumber) {
        *self = &*self / rhs;
    }
}

impl DivAssign for AlgebraicNumber {
    fn div_assign(&mut self, rhs: AlgebraicNumber) {
        *self = &*self / &rhs;
    }
}
