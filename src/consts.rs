/// Months per calendar year
pub const MONTHS_PER_YEAR: usize = 12;

/// Days per week (ISO weeks always start on Monday)
pub const DAYS_PER_WEEK: i64 = 7;

/// Years per century slice of the Gregorian cycle
pub const YEARS_PER_CENTURY: i64 = 100;

/// Centuries in one full 400-year Gregorian cycle; the leap rule (and with
/// it the ISO week layout) repeats exactly after this many centuries.
pub const CENTURIES_PER_CYCLE: usize = 4;

/// Month lengths for a January-first year with February normalized to
/// 30 days.  The two surplus February days are backed out separately by the
/// runtime code, which turns the month-offset sequence into a clean
/// near-linear ramp that a single multiply-shift can reproduce.
pub const MONTH_LENGTHS_FEB30: [i64; MONTHS_PER_YEAR] =
    [31, 30, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Month lengths for a March-first year (the classic computational shift
/// that pushes the leap day to the end of the year), February still at 30.
pub const MONTH_LENGTHS_MARCH_FIRST: [i64; MONTHS_PER_YEAR] =
    [31, 30, 31, 30, 31, 31, 30, 31, 30, 31, 31, 30];

/// Denominator limit for the brute-force phase of month-to-day fits
pub const MONTH_SEARCH_LIMIT: i128 = 257;

/// Denominator limit for the brute-force phase of day-to-month fits
pub const DAY_SEARCH_LIMIT: i128 = 1 << 12;

/// Denominator limit for the brute-force phase of year-to-week fits
pub const YEAR_SEARCH_LIMIT: i128 = 128;

/// Denominator limit for the brute-force phase of week-to-year fits
pub const WEEK_SEARCH_LIMIT: i128 = 2048;
