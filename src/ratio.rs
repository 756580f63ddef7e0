use crate::prelude::*;
use crate::table::Point;
use serde::Serialize;
use std::cmp::Ordering;

/// An exact rational with a positive denominator.
///
/// Equality and ordering compare values (cross-multiplied in i128), so
/// `1/2 == 2/4`.  All rationals produced in this crate keep their
/// cross-products comfortably inside i128: slope bounds come from table
/// deltas (a few thousand at most) and candidate slopes are only ever
/// compared against those.
#[derive(Debug, Clone, Copy, Serialize, Display)]
#[display(fmt = "{num}/{den}")]
pub struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    pub fn new(num: i128, den: i128) -> Self {
        debug_assert!(den > 0, "denominator must be positive");
        Self { num, den }
    }

    pub const fn num(self) -> i128 {
        self.num
    }

    pub const fn den(self) -> i128 {
        self.den
    }

    pub const fn den_is_power_of_two(self) -> bool {
        self.den & (self.den - 1) == 0
    }

    /// `ceil(self * scale)` in exact integer arithmetic.
    pub const fn ceil_scaled(self, scale: i128) -> i128 {
        (self.num * scale + self.den - 1).div_euclid(self.den)
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.num * other.den == other.num * self.den
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        // denominators are positive, so cross-multiplication keeps the order
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

/// A half-open slope interval `[min, max)`.  Only intervals with
/// `min < max` admit any interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[display(fmt = "[{min}, {max})")]
pub struct SlopeInterval {
    pub min: Ratio,
    pub max: Ratio,
}

impl SlopeInterval {
    pub fn new(min: Ratio, max: Ratio) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

/// Lower slope bound between two points: the line may undershoot the true
/// step by at most one count unit, so the rise is `Δy - 1`.
pub fn min_slope(t1: Point, t2: Point) -> Ratio {
    Ratio::new(i128::from(t2.y - t1.y) - 1, i128::from(t2.x - t1.x))
}

/// Upper slope bound between two points (`Δy + 1` over `Δx`).
pub fn max_slope(t1: Point, t2: Point) -> Ratio {
    Ratio::new(i128::from(t2.y - t1.y) + 1, i128::from(t2.x - t1.x))
}

/// Lower slope bound of a point against the origin.
pub fn min_slope_origin(t: Point) -> Ratio {
    min_slope(Point::ORIGIN, t)
}

/// Upper slope bound of a point against the origin.
pub fn max_slope_origin(t: Point) -> Ratio {
    max_slope(Point::ORIGIN, t)
}

/// Scaled signed residual of a point against a candidate slope:
/// `y*den - num*x`.  Minimizing/maximizing this over a table yields the
/// exact intercept interval for the slope, entirely in integers -- the
/// floating-point version of this computation is numerically unreliable at
/// the precision required here.
pub fn intercept_residual(p: Point, slope: Ratio) -> i128 {
    i128::from(p.y) * slope.den() - slope.num() * i128::from(p.x)
}

/// Greatest common divisor by Euclid's algorithm, on absolute values.
pub fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a.rem_euclid(b));
    }
    a
}
