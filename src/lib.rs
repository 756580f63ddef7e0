//! Derives exact multiply-shift constants for calendar conversions.
//!
//! A small calendar runtime wants to turn "which day does month m start
//! on" and "how many ISO weeks have elapsed at year y of its century" into
//! a single integer multiply, add and shift -- no lookup tables, no
//! division, no floating point.  This crate finds those constants and
//! proves them exact over their whole input domain:
//!
//! - [`month_days`] and [`century_week_tables`] build the reference step
//!   tables by closed-form calendar arithmetic;
//! - [`solve`] searches for the simplest rational slope and intercept that
//!   reproduce a table (or several tables at once) exactly, preferring
//!   small denominators but always terminating on a power of two;
//! - [`choose_multiplier`] derives Granlund-Montgomery replacement
//!   constants for division by a fixed divisor;
//! - [`constants`] collects every accepted result under a stable name for
//!   the template step that emits the generated header.
//!
//! All arithmetic is exact integer/rational arithmetic; intercept
//! computation in floating point is numerically unreliable at this
//! precision, which is the reason this crate exists.

mod consts;
mod divconst;
mod prelude;
mod ratio;
mod report;
mod search;
mod solver;
mod table;

pub use consts::*;
pub use divconst::{DivConstError, MagicDiv, choose_multiplier, log2_ceil, log2_floor};
pub use ratio::{
    Ratio, SlopeInterval, gcd, intercept_residual, max_slope, max_slope_origin, min_slope,
    min_slope_origin,
};
pub use report::{ReportError, constants, print_header, print_solution};
pub use search::{bounded_slopes, power_of_two_slopes};
pub use solver::{
    BoundsMode, InterceptRange, Interpolation, SolveError, Solution, joint_slope_interval,
    max_even, slope_interval, solve,
};
pub use table::{
    MonthOrder, Point, StepTable, century_week_tables, isoweek_yearstart, month_days,
    yearstart_rdn,
};
