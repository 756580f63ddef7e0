use crate::ratio::{Ratio, SlopeInterval, intercept_residual, max_slope, min_slope};
use crate::search::{bounded_slopes, power_of_two_slopes};
use crate::table::{Point, StepTable};
use serde::Serialize;
use std::fmt;

/// How the feasible slope interval of a table is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsMode {
    /// Bounds over every pair of table points (tightest interval)
    Pairwise,
    /// Bounds of each point against the origin only
    FromOrigin,
}

/// Error type for affine derivations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The tables admit no affine interpolation at all; a table-design
    /// defect, never a condition to retry.
    #[error("empty slope range {0}: no interpolation exists")]
    EmptySlopeRange(SlopeInterval),

    /// Both search phases ran dry without a usable candidate.
    #[error("slope search exhausted without a power-of-two denominator fit")]
    SearchExhausted,
}

/// Exact integer intercept interval `[lo, hi)` for one table at a fixed
/// slope, scaled by the slope's denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterceptRange {
    pub lo: i128,
    pub hi: i128,
}

impl InterceptRange {
    /// Last intercept still inside the interval.
    pub const fn last(&self) -> i128 {
        self.hi - 1
    }

    /// The intercept chosen for the shipped constant: the member of
    /// `[lo, hi)` with the most trailing zero bits.
    pub fn canonical(&self) -> i128 {
        max_even(self.lo, self.hi)
    }
}

impl fmt::Display for InterceptRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.lo, self.last(), self.canonical())
    }
}

/// A slope with the intercept interval it produces on every solved table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpolation {
    pub slope: Ratio,
    pub intercepts: Vec<InterceptRange>,
}

impl Interpolation {
    /// `floor((num*x + c0) / den)` with the canonical intercept of the
    /// given table.  `None` if no such table was solved.
    pub fn eval(&self, table: usize, x: i64) -> Option<i128> {
        let c = self.intercepts.get(table)?.canonical();
        Some((self.slope.num() * i128::from(x) + c).div_euclid(self.slope.den()))
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} d={} c=", self.slope.num(), self.slope.den())?;
        match self.intercepts.as_slice() {
            [single] => write!(f, "{}..{} c0={}", single.lo, single.last(), single.canonical()),
            many => {
                write!(f, "[")?;
                for (i, range) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{range}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Outcome of a derivation.  `accepted` always has a power-of-two
/// denominator; `bounded` keeps the cheaper small-denominator fit from the
/// brute-force phase when one was found but had to be passed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub bounded: Option<Interpolation>,
    pub accepted: Interpolation,
}

/// Feasible slope interval of a single table.
pub fn slope_interval(table: &StepTable, mode: BoundsMode) -> SlopeInterval {
    let points = table.points();
    let mut bounds: Vec<(Ratio, Ratio)> = Vec::new();
    match mode {
        BoundsMode::Pairwise => {
            for (i, &t1) in points.iter().enumerate() {
                for &t2 in &points[i + 1..] {
                    bounds.push((min_slope(t1, t2), max_slope(t1, t2)));
                }
            }
        }
        BoundsMode::FromOrigin => {
            for &p in &points[1..] {
                bounds.push((min_slope(Point::ORIGIN, p), max_slope(Point::ORIGIN, p)));
            }
        }
    }
    debug_assert!(!bounds.is_empty(), "table too small for slope bounds");
    let mut iter = bounds.into_iter();
    let (mut min, mut max) = iter.next().unwrap_or((Ratio::new(0, 1), Ratio::new(0, 1)));
    for (lo, hi) in iter {
        min = min.max(lo);
        max = max.min(hi);
    }
    SlopeInterval::new(min, max)
}

/// Feasible slope interval common to all tables.
pub fn joint_slope_interval(tables: &[StepTable], mode: BoundsMode) -> SlopeInterval {
    debug_assert!(!tables.is_empty());
    let mut intervals = tables.iter().map(|t| slope_interval(t, mode));
    let first = intervals
        .next()
        .unwrap_or(SlopeInterval::new(Ratio::new(0, 1), Ratio::new(0, 1)));
    intervals.fold(first, |acc, iv| acc.intersect(&iv))
}

/// Tests a candidate slope against every table.  Succeeds only when ALL
/// tables yield a non-empty intercept interval; there is no partial result.
fn fit_slope(tables: &[StepTable], slope: Ratio) -> Option<Interpolation> {
    let mut intercepts = Vec::with_capacity(tables.len());
    for table in tables {
        let mut residuals = table.points()[1..].iter().map(|&p| intercept_residual(p, slope));
        let first = residuals.next()?;
        let (mut rmin, mut rmax) = (first, first);
        for r in residuals {
            rmin = rmin.min(r);
            rmax = rmax.max(r);
        }
        // the scaled intercept may sit anywhere from the largest residual
        // up to (exclusively) the smallest residual plus one denominator
        let (lo, hi) = (rmax, rmin + slope.den());
        if lo >= hi {
            return None;
        }
        intercepts.push(InterceptRange { lo, hi });
    }
    Some(Interpolation { slope, intercepts })
}

/// Derives the simplest affine map reproducing all `tables` at once.
///
/// The brute-force phase enumerates denominators below `limit`; its first
/// fit is accepted outright when the denominator is already a power of two.
/// Otherwise it is kept for reference and the power-of-two phase decides,
/// guaranteeing a result in the form the multiply-shift runtime needs.
///
/// # Errors
/// `SolveError::EmptySlopeRange` when the tables admit no interpolation,
/// `SolveError::SearchExhausted` when no candidate fits within the bounds.
pub fn solve(tables: &[StepTable], limit: i128, mode: BoundsMode) -> Result<Solution, SolveError> {
    let interval = joint_slope_interval(tables, mode);
    if interval.is_empty() {
        return Err(SolveError::EmptySlopeRange(interval));
    }

    let mut bounded_fit = None;
    if let Some(fit) = bounded_slopes(interval, limit).find_map(|s| fit_slope(tables, s)) {
        if fit.slope.den_is_power_of_two() {
            return Ok(Solution { bounded: None, accepted: fit });
        }
        bounded_fit = Some(fit);
    }

    if let Some(fit) = power_of_two_slopes(interval).find_map(|s| fit_slope(tables, s)) {
        return Ok(Solution { bounded: bounded_fit, accepted: fit });
    }
    Err(SolveError::SearchExhausted)
}

/// Picks the value in `lo..hi` with the most trailing zero bits, by
/// repeatedly adding the least-significant one-bit while it stays in range.
pub fn max_even(lo: i128, hi: i128) -> i128 {
    debug_assert!(lo < hi);
    if lo <= 0 && hi > 0 {
        return 0;
    }
    if hi <= 0 {
        // mirror a purely negative range; trailing zeros are sign-agnostic
        return -max_even_positive(1 - hi, 1 - lo);
    }
    max_even_positive(lo, hi)
}

fn max_even_positive(mut lo: i128, hi: i128) -> i128 {
    debug_assert!(0 < lo && lo < hi);
    loop {
        let z = lo + (lo & lo.wrapping_neg());
        if z >= hi {
            return lo;
        }
        lo = z;
    }
}
