use crate::consts::{
    CENTURIES_PER_CYCLE, DAYS_PER_WEEK, MONTH_LENGTHS_FEB30, MONTH_LENGTHS_MARCH_FIRST,
    YEARS_PER_CENTURY,
};
use crate::prelude::*;
use serde::Serialize;

/// A single reference-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[display(fmt = "({x}, {y})")]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Which month ordering a month table is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MonthOrder {
    /// Civil ordering, January first
    #[display(fmt = "january-first")]
    JanuaryFirst,
    /// Computational ordering, March first (leap day pushed to year end)
    #[display(fmt = "march-first")]
    MarchFirst,
}

/// A monotone integer step table: x strictly increasing from 0, y
/// non-decreasing.  Between listed points the underlying function is
/// constant at the y of the nearest listed point at or below x, so a table
/// describes `f(x)` over its whole x-domain, not just at the listed points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTable(Vec<Point>);

impl StepTable {
    /// Wraps a point list, checking the monotonicity invariant.
    pub fn from_points(points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.windows(2).all(|w| w[0].x < w[1].x && w[0].y <= w[1].y));
        Self(points)
    }

    /// Builds the cumulative table of a step-length sequence: the point at
    /// index i carries the sum of the first i lengths, starting from (0, 0).
    pub fn from_lengths(lengths: &[i64]) -> Self {
        let mut points = Vec::with_capacity(lengths.len() + 1);
        let mut acc = 0;
        points.push(Point::ORIGIN);
        for (i, len) in lengths.iter().enumerate() {
            acc += len;
            points.push(Point::new(i as i64 + 1, acc));
        }
        Self(points)
    }

    /// Swaps the x- and y-values of every point to obtain the reverse
    /// mapping.  Whenever the swapped x advances by more than one, the
    /// boundary value is intercalated so the result is again a valid step
    /// table over its whole domain.
    pub fn transposed(&self) -> Self {
        let mut points = Vec::with_capacity(self.0.len() * 2);
        let (mut last_x, mut last_y) = (0, 0);
        for p in &self.0 {
            let (x, y) = (p.y, p.x);
            if x - 1 > last_x {
                points.push(Point::new(x - 1, last_y));
            }
            last_x = x;
            last_y = y;
            points.push(Point::new(x, y));
        }
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// First x past the table's domain.
    pub fn domain_end(&self) -> i64 {
        match self.0.last() {
            Some(p) => p.x + 1,
            None => 0,
        }
    }

    /// Step-function evaluation: the y of the greatest listed x not above
    /// the queried x.  `None` outside the table's domain.
    pub fn value_at(&self, x: i64) -> Option<i64> {
        if x < 0 || x >= self.domain_end() {
            return None;
        }
        match self.0.binary_search_by_key(&x, |p| p.x) {
            Ok(i) => Some(self.0[i].y),
            Err(0) => None,
            Err(i) => Some(self.0[i - 1].y),
        }
    }
}

/// Cumulative day offsets per month for the requested ordering, February
/// counted with 30 days.
pub fn month_days(order: MonthOrder) -> StepTable {
    let lengths = match order {
        MonthOrder::JanuaryFirst => &MONTH_LENGTHS_FEB30,
        MonthOrder::MarchFirst => &MONTH_LENGTHS_MARCH_FIRST,
    };
    StepTable::from_lengths(lengths)
}

/// Rata Die Number of January 1st of a Gregorian year.
pub const fn yearstart_rdn(year: i64) -> i64 {
    let y = year - 1;
    y * 365 + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + 1
}

/// Ordinal number of the first week of an ISO 8601 week year, counted
/// continuously from the Christian epoch.  Takes the RDN of the Gregorian
/// year start, snaps to the week containing the year's first Thursday, and
/// divides by seven.
pub fn isoweek_yearstart(year: i64) -> i64 {
    let mut rdn = yearstart_rdn(year) - 3;
    rdn += (1 - rdn).rem_euclid(DAYS_PER_WEEK);
    let (weeks, rem) = ((rdn - 1).div_euclid(DAYS_PER_WEEK), (rdn - 1).rem_euclid(DAYS_PER_WEEK));
    // a misaligned week start would mean the closed form above is broken
    assert_eq!(rem, 0, "ISO week start not aligned on a 7-day boundary");
    weeks + 1
}

/// For each century of the 400-year cycle: elapsed ISO weeks at the start
/// of every year, counted from that century's own first week.
pub fn century_week_tables() -> [StepTable; CENTURIES_PER_CYCLE] {
    core::array::from_fn(|c| {
        let century_start = isoweek_yearstart(c as i64 * YEARS_PER_CENTURY + 1);
        let points = (0..YEARS_PER_CENTURY)
            .map(|yi| {
                let year_start = isoweek_yearstart(c as i64 * YEARS_PER_CENTURY + yi + 1);
                Point::new(yi, year_start - century_start)
            })
            .collect();
        StepTable::from_points(points)
    })
}
