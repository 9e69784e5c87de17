//! General binary arithmetic through resultant elimination.
//!
//! For irrational operands with no cheaper route, the sum, difference,
//! product, or quotient is a root of an eliminant built from the two
//! minimal polynomials. The eliminant is canonicalized, the value is
//! isolated among its roots by interval arithmetic on the operand
//! enclosures, and the true minimal polynomial is then reselected from
//! the certified factor search.

use crate::isolate::{isolate_with, minimal_defining_factor, IsolationConfig};
use crate::number::AlgebraicNumber;
use crate::poly::resultant::{compose_add, compose_div, compose_mul, compose_sub};
use tracing::debug;

/// The four eliminant-backed operations.
#[derive(Clone, Copy, Debug)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Combine two irrational operands through the eliminant for `op`.
///
/// Division requires a nonzero divisor; the dispatcher rejects zero before
/// routing here. The divisor enclosure may still straddle zero at low
/// precision, in which case the approximation declines and escalates.
pub(crate) fn combine(op: BinOp, x: &AlgebraicNumber, y: &AlgebraicNumber) -> AlgebraicNumber {
    debug_assert!(
        x.degree() >= 2 && y.degree() >= 2,
        "rational operands take the scalar path"
    );
    debug_assert!(!matches!(op, BinOp::Div) || !y.is_zero());

    let px = x.minimal_polynomial();
    let py = y.minimal_polynomial();
    let raw = match op {
        BinOp::Add => compose_add(px, py),
        BinOp::Sub => compose_sub(px, py),
        BinOp::Mul => compose_mul(px, py),
        BinOp::Div => compose_div(px, py),
    };
    let candidate = raw.canonical();
    debug!(
        ?op,
        degree = candidate.degree(),
        "eliminant canonicalized"
    );

    let cfg = IsolationConfig::default();
    let bx = isolate_with(&candidate, &cfg, |prec| {
        let a = x.box_at(prec);
        let b = y.box_at(prec);
        match op {
            BinOp::Add => Some(a.add(&b, prec)),
            BinOp::Sub => Some(a.sub(&b, prec)),
            BinOp::Mul => Some(a.mul(&b, prec)),
            BinOp::Div => a.checked_div(&b, prec),
        }
    });
    let (minimal, enc) = minimal_defining_factor(&candidate, &bx, &cfg);
    AlgebraicNumber::from_parts(minimal, enc)
}
