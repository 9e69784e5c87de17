//! Root isolation and enclosure refinement.
//!
//! The numeric side of every algebraic operation funnels through here:
//! a caller supplies a way to recompute a guaranteed enclosure of a value
//! at any working precision, and this module escalates precision until the
//! enclosure isolates a single root of the value's defining polynomial.
//!
//! ## Algorithms
//!
//! - **Separation acceptance**: an enclosure tighter than the polynomial's
//!   root separation bound contains at most one root; since it contains the
//!   value by construction, it isolates it.
//! - **Newton refinement**: a posteriori certified steps from the box
//!   midpoint, accepted only when the certified disc stays inside the
//!   current box (which pins it to the same root).
//! - **Quadrisection**: certified fallback; subboxes whose interval image
//!   excludes zero contain no root and are discarded.
//! - **Factor selection**: reconstruction of the minimal defining factor
//!   from certified all-root approximations, verified by exact division.
//!
//! ## References
//!
//! - "Algorithms in Real Algebraic Geometry" (Basu et al., 2006)
//! - Kerber & Sagraloff, "Efficient real root approximation" (2011)

use crate::enclosure::Enclosure;
use crate::interval::{dyadic_floor, rational_sqrt_upper, Interval};
use crate::poly::roots::{certified_root_discs, eval_at_point, separation_lower_bound, RootDisc};
use crate::poly::IntPoly;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::{debug, trace};

/// Configuration for precision escalation.
#[derive(Debug, Clone)]
pub struct IsolationConfig {
    /// Starting working precision in bits.
    pub initial_prec: u32,
    /// Hard precision cap in bits; exceeding it is treated as an internal
    /// defect, since separation bounds prove isolation terminates far
    /// below any sane cap.
    pub max_prec: u32,
}

impl Default for IsolationConfig {
    fn default() -> Self {
        Self {
            initial_prec: 64,
            max_prec: 1 << 16,
        }
    }
}

/// Doubling precision schedule from the initial precision to the cap.
pub(crate) fn precision_ladder(cfg: &IsolationConfig) -> impl Iterator<Item = u32> {
    let max = cfg.max_prec.max(cfg.initial_prec);
    std::iter::successors(Some(cfg.initial_prec.max(8)), move |&p| {
        (p < max).then(|| p.saturating_mul(2).min(max))
    })
}

/// Escalate a guaranteed approximator until it isolates one root of `poly`.
///
/// `approx(prec)` must return a box containing the target value whenever it
/// returns at all; `None` means the precision did not suffice (a divisor
/// box still straddling zero, an undecidable branch) and simply escalates.
///
/// Panics past the precision cap: algebraic values are provably separable,
/// so exhaustion indicates a defect, not an input condition.
pub(crate) fn isolate_with<F>(poly: &IntPoly, cfg: &IsolationConfig, mut approx: F) -> Enclosure
where
    F: FnMut(u32) -> Option<Enclosure>,
{
    debug_assert!(poly.degree() >= 1, "cannot isolate roots of a constant");
    let sep = separation_lower_bound(poly);
    for prec in precision_ladder(cfg) {
        let Some(bx) = approx(prec) else {
            trace!(prec, "approximation undecided, escalating");
            continue;
        };
        if bx.diam_bound() < sep {
            debug!(prec, degree = poly.degree(), "enclosure isolated");
            return bx;
        }
        trace!(prec, "enclosure wider than separation bound");
    }
    panic!("root isolation exceeded the precision cap");
}

/// Tighten an isolating enclosure to roughly `2^-prec` diameter.
///
/// `current` must contain exactly one root of `poly`; the result is a
/// sub-box of `current` containing the same root. Exactly-pinned component
/// intervals (a real value's `[0, 0]` imaginary part) are preserved.
pub(crate) fn refine_enclosure(poly: &IntPoly, current: &Enclosure, prec: u32) -> Enclosure {
    let target = BigRational::new(BigInt::one(), BigInt::one() << prec);
    if current.diam_bound() <= target {
        return current.clone();
    }
    let wp = prec.saturating_add(64);
    if let Some(refined) = newton_refine(poly, current, &target, wp) {
        return refined;
    }
    trace!(prec, "newton refinement rejected, quadrisecting");
    quadrisect(poly, current, &target, wp)
}

/// Newton iteration from the box midpoint with exact a posteriori bounds.
///
/// The nearest-root bound `d * |p(c) / p'(c)|` certifies a disc around the
/// iterate containing some root; the disc is accepted only when it lies
/// inside `current`, which makes that root the enclosed one.
fn newton_refine(
    poly: &IntPoly,
    current: &Enclosure,
    target: &BigRational,
    wp: u32,
) -> Option<Enclosure> {
    let pinned_real = current.im().is_zero_point();
    // A real-axis slice of the certified disc still contains the root:
    // a non-real root inside the disc would pair with its conjugate at
    // distance below the separation bound. No such pairing certifies a
    // slice pinned anywhere else, so those boxes go to subdivision.
    if current.re().is_point() || (current.im().is_point() && !pinned_real) {
        return None;
    }
    let sep = separation_lower_bound(poly);
    let deriv = poly.derivative();
    let degree = BigRational::from_integer(BigInt::from(poly.degree()));
    let (mut cr, mut ci) = current.midpoint();
    for _ in 0..48 {
        let (pr, pi) = eval_at_point(poly, &cr, &ci);
        let (qr, qi) = eval_at_point(&deriv, &cr, &ci);
        let den = &qr * &qr + &qi * &qi;
        if den.is_zero() {
            return None;
        }
        let num = &pr * &pr + &pi * &pi;
        let r_sq = &degree * &degree * num / &den;
        let radius = rational_sqrt_upper(&r_sq, wp);
        let im_iv = if pinned_real {
            current.im().clone()
        } else {
            Interval::centered(&ci, &radius)
        };
        let disc_box = Enclosure::new(Interval::centered(&cr, &radius), im_iv);
        let diam = disc_box.diam_bound();
        if diam <= *target && (!pinned_real || diam < sep) {
            if current.contains_enclosure(&disc_box) {
                return disc_box.intersect(current);
            }
            // Certified but outside: the iterate drifted to another root.
            return None;
        }
        // c <- c - p(c)/p'(c), componentwise via p * conj(p') / |p'|^2.
        let step_re = (&pr * &qr + &pi * &qi) / &den;
        let step_im = (&pi * &qr - &pr * &qi) / &den;
        cr = dyadic_floor(&(&cr - &step_re), wp);
        if !step_im.is_zero() {
            ci = dyadic_floor(&(&ci - &step_im), wp);
        }
    }
    None
}

/// Certified subdivision fallback.
///
/// Splits surviving boxes in four (two along a pinned axis) and discards
/// any child whose interval image of `poly` excludes zero. The hull of the
/// survivors always contains the enclosed root, and its diameter halves
/// every level.
fn quadrisect(poly: &IntPoly, current: &Enclosure, target: &BigRational, wp: u32) -> Enclosure {
    let mut wp = wp;
    let mut boxes = vec![current.clone()];
    let max_levels = wp as usize + 192;
    for _ in 0..max_levels {
        let hull = boxes
            .iter()
            .skip(1)
            .fold(boxes[0].clone(), |acc, b| acc.hull(b));
        if hull.diam_bound() <= *target {
            return hull;
        }
        let mut next = Vec::with_capacity(boxes.len() * 2);
        for b in &boxes {
            for child in split_box(b) {
                if poly.eval_box(&child, wp).excludes_zero() {
                    continue;
                }
                next.push(child);
            }
        }
        // Interval evaluation over a box holding the root always
        // contains zero, so the root is never discarded.
        assert!(!next.is_empty(), "subdivision excluded the enclosed root");
        if next.len() > 64 {
            // Exclusion is failing for side boxes; evaluate sharper.
            wp = wp.saturating_mul(2);
        }
        boxes = next;
    }
    panic!("enclosure refinement exceeded the subdivision budget");
}

fn split_interval(iv: &Interval) -> Vec<Interval> {
    if iv.is_point() {
        return vec![iv.clone()];
    }
    let m = iv.midpoint();
    vec![
        Interval::new(iv.lo().clone(), m.clone()),
        Interval::new(m, iv.hi().clone()),
    ]
}

fn split_box(b: &Enclosure) -> Vec<Enclosure> {
    let mut out = Vec::with_capacity(4);
    for re in split_interval(b.re()) {
        for im in split_interval(b.im()) {
            out.push(Enclosure::new(re.clone(), im));
        }
    }
    out
}

/// Replace a squarefree defining polynomial by the minimal-degree factor
/// that still has the enclosed value as a root.
///
/// `value_box` must isolate the value among the roots of `candidate`
/// (canonical form). Returns the minimal polynomial together with an
/// enclosure isolating the value among its roots; rational values come
/// back with an exact point enclosure.
pub(crate) fn minimal_defining_factor(
    candidate: &IntPoly,
    value_box: &Enclosure,
    cfg: &IsolationConfig,
) -> (IntPoly, Enclosure) {
    let d = candidate.degree();
    debug_assert!(d >= 1);
    if d == 1 {
        let root = BigRational::new(-candidate.coeff(0), candidate.coeff(1));
        return (candidate.clone(), Enclosure::from_rational(&root));
    }
    let lc = candidate.leading_coeff().clone();
    let lc_rat = BigRational::from_integer(lc.clone());
    let companion = candidate.monic_scaled();
    let mut refined = value_box.clone();
    for prec in precision_ladder(cfg) {
        refined = refine_enclosure(candidate, &refined, prec);
        let Some(discs) = certified_root_discs(&companion, prec) else {
            trace!(prec, "root discs not certified, escalating");
            continue;
        };
        // The companion's roots are the candidate's scaled by the leading
        // coefficient; locate the disc owning the enclosed value.
        let scaled = refined.scale_rational(&lc_rat);
        let hits: Vec<usize> = (0..d)
            .filter(|&k| discs[k].to_box().intersect(&scaled).is_some())
            .collect();
        let target = match hits.as_slice() {
            [] => unreachable!("certified discs cover every root"),
            [only] => *only,
            _ => {
                trace!(prec, hits = hits.len(), "value box meets several discs");
                continue;
            }
        };
        match search_factors(candidate, &discs, target, &lc, &refined, prec) {
            Search::Found(f, enc) => {
                debug!(prec, degree = f.degree(), "proper minimal factor found");
                // A degree-1 factor pins an exact rational value.
                if f.degree() == 1 {
                    let root = BigRational::new(-f.coeff(0), f.coeff(1));
                    return (f, Enclosure::from_rational(&root));
                }
                return (f, enc);
            }
            Search::Irreducible => {
                let back = discs[target].to_box().scale_rational(&lc_rat.recip());
                let enc = refined.intersect(&back).unwrap_or(refined);
                return (candidate.clone(), enc);
            }
            Search::Undecided => {}
        }
    }
    panic!("minimal factor selection exceeded the precision cap");
}

enum Search {
    Found(IntPoly, Enclosure),
    Irreducible,
    Undecided,
}

enum Try {
    Found(IntPoly, Enclosure),
    Wrong,
    Undecided,
}

/// Enumerate conjugate subsets containing the target root, ascending by
/// size, so the first verified factor has minimal degree.
fn search_factors(
    candidate: &IntPoly,
    discs: &[RootDisc],
    target: usize,
    lc: &BigInt,
    refined: &Enclosure,
    prec: u32,
) -> Search {
    let d = candidate.degree();
    let wp = prec.saturating_add(32);
    let others: Vec<usize> = (0..d).filter(|&k| k != target).collect();
    for size in 1..d {
        let mut undecided = false;
        let mut combos = Combinations::new(others.len(), size - 1);
        while let Some(chosen) = combos.next() {
            let mut subset: Vec<usize> = chosen.iter().map(|&i| others[i]).collect();
            subset.push(target);
            match try_subset(candidate, discs, &subset, lc, refined, wp) {
                // Equal-degree defining polynomials coincide, so a find is
                // minimal even if a same-size subset stayed undecided.
                Try::Found(f, enc) => return Search::Found(f, enc),
                Try::Wrong => {}
                Try::Undecided => undecided = true,
            }
        }
        if undecided {
            // A smaller factor could still be hiding behind the undecided
            // subsets; larger subsets must not preempt it.
            return Search::Undecided;
        }
    }
    Search::Irreducible
}

/// Test one conjugate subset: build its monic factor from coefficient
/// boxes, round to integers, and verify by exact division plus an interval
/// ownership test. Numeric guesses are harmless; every acceptance is
/// backed by exact arithmetic.
fn try_subset(
    candidate: &IntPoly,
    discs: &[RootDisc],
    subset: &[usize],
    lc: &BigInt,
    refined: &Enclosure,
    wp: u32,
) -> Try {
    // Coefficient boxes of prod_{k in subset} (x - w_k).
    let one = BigRational::one();
    let mut coeffs: Vec<Enclosure> = vec![Enclosure::from_rational(&one)];
    for &k in subset {
        let w = discs[k].to_box();
        let mut next = vec![Enclosure::zero(); coeffs.len() + 1];
        for (i, c) in coeffs.iter().enumerate() {
            next[i + 1] = next[i + 1].add(c, wp);
            next[i] = next[i].sub(&c.mul(&w, wp), wp);
        }
        coeffs = next;
    }

    let mut ints = Vec::with_capacity(coeffs.len());
    for c in &coeffs {
        if !c.im().contains_zero() {
            // The true coefficient is certainly non-real.
            return Try::Wrong;
        }
        let lo = c.re().lo().ceil().to_integer();
        let hi = c.re().hi().floor().to_integer();
        if lo > hi {
            // The true coefficient is certainly not an integer.
            return Try::Wrong;
        }
        if lo != hi {
            return Try::Undecided;
        }
        ints.push(lo);
    }

    let monic_factor = IntPoly::new(ints);
    // Map back from companion coordinates: roots shrink by lc.
    let f = monic_factor.compose_scale(lc).primitive_part().sign_normalized();
    let Some(cofactor) = candidate.exact_div(&f) else {
        // Integer rounding was unambiguous, so the subset itself is wrong.
        return Try::Wrong;
    };
    // The value is a root of exactly one of the coprime factors.
    if cofactor.eval_box(refined, wp).excludes_zero() {
        return Try::Found(f, refined.clone());
    }
    if f.eval_box(refined, wp).excludes_zero() {
        return Try::Wrong;
    }
    Try::Undecided
}

/// Lexicographic k-subsets of `0..n`.
struct Combinations {
    n: usize,
    k: usize,
    idx: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            idx: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    fn next(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.idx);
        }
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.idx[i] != i + self.n - self.k {
                break;
            }
        }
        self.idx[i] += 1;
        for j in i + 1..self.k {
            self.idx[j] = self.idx[j - 1] + 1;
        }
        Some(&self.idx)
    }
}
