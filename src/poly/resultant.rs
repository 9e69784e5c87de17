//! Resultant-based elimination for algebraic number combination.
//!
//! Adding, subtracting, multiplying, or dividing two algebraic numbers with
//! defining polynomials `A` and `B` produces a value whose defining
//! polynomial divides a resultant that eliminates the operand variable:
//!
//! - sum:        `Res_x(A(x), B(z - x))`
//! - difference: `Res_x(A(x), B(x - z))`
//! - product:    `Res_x(A(x), x^m * B(z/x))` with `m = deg B`
//! - quotient:   `Res_y(A(z*y), B(y))`, the quotient `z = x/y` rewritten as
//!   `z*y = x` so no symbolic inversion is ever formed
//!
//! Entries of the Sylvester matrix are univariate integer polynomials in
//! `z`, so the determinant is computed by fraction-free Bareiss elimination,
//! whose every division is exact in `Z[z]`.
//!
//! Reference: Cohen, "A Course in Computational Algebraic Number Theory",
//! section 3.3.2; Geddes, Czapor & Labahn, chapter 9.

use super::IntPoly;
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Defining polynomial for `x + y`: `Res_x(A(x), B(z - x))`.
pub fn compose_add(a: &IntPoly, b: &IntPoly) -> IntPoly {
    let p = constant_coeffs(a);
    // B(z - x) = sum_j b_j (z - x)^j; the x^i coefficient collects
    // binom(j, i) (-1)^i b_j z^(j-i).
    let m = b.degree();
    let mut q = vec![IntPoly::zero(); m + 1];
    for j in 0..=m {
        let bj = b.coeff(j);
        if bj.is_zero() {
            continue;
        }
        for (i, binom) in binomial_row(j).into_iter().enumerate() {
            let mut c = binom * &bj;
            if i % 2 == 1 {
                c = -c;
            }
            q[i] = q[i].add(&IntPoly::constant(c).mul_xpow(j - i));
        }
    }
    resultant_in_x(&p, &q)
}

/// Defining polynomial for `x - y`: `Res_x(A(x), B(x - z))`.
pub fn compose_sub(a: &IntPoly, b: &IntPoly) -> IntPoly {
    let p = constant_coeffs(a);
    // B(x - z) = sum_j b_j (x - z)^j; the x^i coefficient collects
    // binom(j, i) (-1)^(j-i) b_j z^(j-i).
    let m = b.degree();
    let mut q = vec![IntPoly::zero(); m + 1];
    for j in 0..=m {
        let bj = b.coeff(j);
        if bj.is_zero() {
            continue;
        }
        for (i, binom) in binomial_row(j).into_iter().enumerate() {
            let mut c = binom * &bj;
            if (j - i) % 2 == 1 {
                c = -c;
            }
            q[i] = q[i].add(&IntPoly::constant(c).mul_xpow(j - i));
        }
    }
    resultant_in_x(&p, &q)
}

/// Defining polynomial for `x * y`: `Res_x(A(x), x^m B(z/x))`.
///
/// Requires `B(0) != 0`, which holds whenever `y` is nonzero and `B` is its
/// minimal polynomial.
pub fn compose_mul(a: &IntPoly, b: &IntPoly) -> IntPoly {
    let p = constant_coeffs(a);
    let m = b.degree();
    debug_assert!(!b.coeff(0).is_zero(), "product elimination needs B(0) != 0");
    // x^m B(z/x) places b_j z^j at x^(m-j).
    let mut q = vec![IntPoly::zero(); m + 1];
    for j in 0..=m {
        let bj = b.coeff(j);
        if bj.is_zero() {
            continue;
        }
        q[m - j] = IntPoly::constant(bj).mul_xpow(j);
    }
    resultant_in_x(&p, &q)
}

/// Defining polynomial for `x / y`: `Res_y(A(z*y), B(y))`.
///
/// The quotient relation is used in product form `z*y = x`, so the division
/// never inverts anything; the zero-divisor case is rejected before this
/// path is reached.
pub fn compose_div(a: &IntPoly, b: &IntPoly) -> IntPoly {
    // A(z*y) places a_i z^i at y^i.
    let n = a.degree();
    let mut p = vec![IntPoly::zero(); n + 1];
    for i in 0..=n {
        let ai = a.coeff(i);
        if ai.is_zero() {
            continue;
        }
        p[i] = IntPoly::constant(ai).mul_xpow(i);
    }
    let q = constant_coeffs(b);
    resultant_in_x(&p, &q)
}

/// Lift a polynomial in `z` to an `x`-polynomial of constant coefficients.
fn constant_coeffs(a: &IntPoly) -> Vec<IntPoly> {
    a.coeffs()
        .iter()
        .map(|c| IntPoly::constant(c.clone()))
        .collect()
}

/// Row `n` of Pascal's triangle.
fn binomial_row(n: usize) -> Vec<BigInt> {
    let mut row = vec![BigInt::one()];
    for k in 0..n {
        let next = &row[k] * BigInt::from(n - k) / BigInt::from(k + 1);
        row.push(next);
    }
    row
}

/// Resultant in `x` of two `x`-polynomials with coefficients in `Z[z]`.
///
/// The coefficient slices are low-to-high in `x`; both leading coefficients
/// must be nonzero polynomials.
fn resultant_in_x(p: &[IntPoly], q: &[IntPoly]) -> IntPoly {
    let n = p.len() - 1;
    let m = q.len() - 1;
    debug_assert!(!p[n].is_zero() && !q[m].is_zero());
    let size = n + m;
    // Sylvester matrix: m shifted rows of p over n shifted rows of q,
    // coefficients high-to-low.
    let mut mat = vec![vec![IntPoly::zero(); size]; size];
    for r in 0..m {
        for (k, c) in p.iter().rev().enumerate() {
            mat[r][r + k] = c.clone();
        }
    }
    for r in 0..n {
        for (k, c) in q.iter().rev().enumerate() {
            mat[m + r][r + k] = c.clone();
        }
    }
    determinant_bareiss(mat)
}

/// Fraction-free determinant of a square matrix over `Z[z]`.
///
/// Bareiss elimination: every division is by the previous pivot and is
/// exact in the coefficient ring.
fn determinant_bareiss(mut m: Vec<Vec<IntPoly>>) -> IntPoly {
    let n = m.len();
    if n == 0 {
        return IntPoly::one();
    }
    let mut negate = false;
    let mut prev = IntPoly::one();
    for k in 0..n - 1 {
        if m[k][k].is_zero() {
            let swap = (k + 1..n).find(|&i| !m[i][k].is_zero());
            match swap {
                Some(i) => {
                    m.swap(k, i);
                    negate = !negate;
                }
                None => return IntPoly::zero(),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = m[k][k].mul(&m[i][j]).sub(&m[i][k].mul(&m[k][j]));
                m[i][j] = match num.exact_div(&prev) {
                    Some(t) => t,
                    None => unreachable!("Bareiss division is exact"),
                };
            }
            m[i][k] = IntPoly::zero();
        }
        prev = m[k][k].clone();
    }
    let det = m[n - 1][n - 1].clone();
    if negate {
        det.neg()
    } else {
        det
    }
}
