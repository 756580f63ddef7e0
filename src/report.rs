use crate::consts::{
    DAY_SEARCH_LIMIT, MONTH_SEARCH_LIMIT, WEEK_SEARCH_LIMIT, YEAR_SEARCH_LIMIT,
};
use crate::divconst::{DivConstError, MagicDiv, choose_multiplier};
use crate::solver::{BoundsMode, Interpolation, SolveError, Solution, solve};
use crate::table::{MonthOrder, StepTable, century_week_tables, month_days};
use std::collections::BTreeMap;

/// Error type for report generation; wraps whichever derivation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    DivConst(#[from] DivConstError),
}

/// Prints a report title between separator lines.
pub fn print_header(title: &str) {
    println!("\n---------------------------------------------------------------------");
    println!("{title}");
    println!("---------------------------------------------------------------------");
}

/// Prints a derivation outcome: the passed-over brute-force fit first when
/// there was one, then the accepted power-of-two fit.
pub fn print_solution(solution: &Solution) {
    if let Some(fit) = &solution.bounded {
        println!("{fit}");
    }
    println!("{}", solution.accepted);
}

fn insert(map: &mut BTreeMap<&'static str, i128>, names: [&'static str; 3], fit: &Interpolation) {
    let [mul, div, add] = names;
    map.insert(mul, fit.slope.num());
    map.insert(div, fit.slope.den());
    map.insert(add, fit.intercepts[0].canonical());
}

fn insert_div(map: &mut BTreeMap<&'static str, i128>, names: [&'static str; 3], m: &MagicDiv) {
    let [high, low, shift] = names;
    map.insert(high, m.m_high as i128);
    map.insert(low, m.m_low as i128);
    map.insert(shift, m.post_shift as i128);
}

/// Runs every shipped derivation and collects the accepted constants under
/// stable names, ready to be substituted into a source template:
///
/// - `month_to_day_{mul,div,add}` / `day_to_month_{mul,div,add}` for the
///   January-first calendar, `shifted_` prefixed for March-first;
/// - `year_to_week_{mul,div}` and `week_to_year_{mul,div}` with per-century
///   intercepts `..._add_0` through `..._add_3`;
/// - `div_1461_{mul_high,mul_low,shift}` and `div_146097_*` for the wide
///   division replacements, `div_1461_short_*` for the narrow 18-bit variant
///   and `div_7_*` for the 64-bit weekday divisor.
///
/// # Errors
/// Propagates the first failing derivation; a failure here means a shipped
/// table regressed and there is nothing useful to emit.
pub fn constants() -> Result<BTreeMap<&'static str, i128>, ReportError> {
    let mut map = BTreeMap::new();

    let m2d = solve_one(month_days(MonthOrder::JanuaryFirst), MONTH_SEARCH_LIMIT)?;
    insert(&mut map, ["month_to_day_mul", "month_to_day_div", "month_to_day_add"], &m2d.accepted);

    let d2m = solve_one(month_days(MonthOrder::JanuaryFirst).transposed(), DAY_SEARCH_LIMIT)?;
    insert(&mut map, ["day_to_month_mul", "day_to_month_div", "day_to_month_add"], &d2m.accepted);

    let m2d = solve_one(month_days(MonthOrder::MarchFirst), MONTH_SEARCH_LIMIT)?;
    insert(
        &mut map,
        ["shifted_month_to_day_mul", "shifted_month_to_day_div", "shifted_month_to_day_add"],
        &m2d.accepted,
    );

    let d2m = solve_one(month_days(MonthOrder::MarchFirst).transposed(), DAY_SEARCH_LIMIT)?;
    insert(
        &mut map,
        ["shifted_day_to_month_mul", "shifted_day_to_month_div", "shifted_day_to_month_add"],
        &d2m.accepted,
    );

    let centuries = century_week_tables();
    let y2w = solve(&centuries, YEAR_SEARCH_LIMIT, BoundsMode::Pairwise)?;
    map.insert("year_to_week_mul", y2w.accepted.slope.num());
    map.insert("year_to_week_div", y2w.accepted.slope.den());
    let adds = ["year_to_week_add_0", "year_to_week_add_1", "year_to_week_add_2", "year_to_week_add_3"];
    for (name, range) in adds.into_iter().zip(&y2w.accepted.intercepts) {
        map.insert(name, range.canonical());
    }

    let transposed: Vec<StepTable> = centuries.iter().map(StepTable::transposed).collect();
    let w2y = solve(&transposed, WEEK_SEARCH_LIMIT, BoundsMode::Pairwise)?;
    map.insert("week_to_year_mul", w2y.accepted.slope.num());
    map.insert("week_to_year_div", w2y.accepted.slope.den());
    let adds = ["week_to_year_add_0", "week_to_year_add_1", "week_to_year_add_2", "week_to_year_add_3"];
    for (name, range) in adds.into_iter().zip(&w2y.accepted.intercepts) {
        map.insert(name, range.canonical());
    }

    let m = choose_multiplier(1461, 32, 18, true)?;
    insert_div(
        &mut map,
        ["div_1461_short_mul_high", "div_1461_short_mul_low", "div_1461_short_shift"],
        &m,
    );
    let m = choose_multiplier(1461, 32, 31, true)?;
    insert_div(&mut map, ["div_1461_mul_high", "div_1461_mul_low", "div_1461_shift"], &m);
    let m = choose_multiplier(7, 64, 64, true)?;
    insert_div(&mut map, ["div_7_mul_high", "div_7_mul_low", "div_7_shift"], &m);
    let m = choose_multiplier(146_097, 33, 33, true)?;
    insert_div(&mut map, ["div_146097_mul_high", "div_146097_mul_low", "div_146097_shift"], &m);

    Ok(map)
}

fn solve_one(table: StepTable, limit: i128) -> Result<Solution, SolveError> {
    solve(std::slice::from_ref(&table), limit, BoundsMode::Pairwise)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_namespace() {
        let map = constants().unwrap_or_else(|e| panic!("derivation failed: {e}"));

        assert_eq!(map["month_to_day_mul"], 489);
        assert_eq!(map["month_to_day_div"], 16);
        assert_eq!(map["month_to_day_add"], 8);
        assert_eq!(map["day_to_month_mul"], 67);
        assert_eq!(map["day_to_month_div"], 2048);
        assert_eq!(map["day_to_month_add"], 32);

        assert_eq!(map["shifted_month_to_day_mul"], 979);
        assert_eq!(map["shifted_month_to_day_div"], 32);
        assert_eq!(map["shifted_month_to_day_add"], 16);
        assert_eq!(map["shifted_day_to_month_mul"], 535);
        assert_eq!(map["shifted_day_to_month_div"], 16384);
        assert_eq!(map["shifted_day_to_month_add"], 332);

        assert_eq!(map["year_to_week_mul"], 53431);
        assert_eq!(map["year_to_week_div"], 1024);
        assert_eq!(map["year_to_week_add_0"], 448);
        assert_eq!(map["year_to_week_add_3"], 608);

        assert_eq!(map["week_to_year_mul"], 157);
        assert_eq!(map["week_to_year_div"], 8192);
        assert_eq!(map["week_to_year_add_0"], 84);
        assert_eq!(map["week_to_year_add_2"], 16);

        assert_eq!(map["div_1461_short_mul_low"], 2_939_756);
        assert_eq!(map["div_1461_short_shift"], 0);
        assert_eq!(map["div_1461_mul_high"], 0);
        assert_eq!(map["div_1461_mul_low"], 376_287_347);
        assert_eq!(map["div_1461_shift"], 7);
        assert_eq!(map["div_7_mul_high"], 1);
        assert_eq!(map["div_7_mul_low"], 2_635_249_153_387_078_803);
        assert_eq!(map["div_7_shift"], 3);
        assert_eq!(map["div_146097_mul_low"], 7_706_523_111);
        assert_eq!(map["div_146097_shift"], 17);

        // one name per constant, nothing extra
        assert_eq!(map.len(), 4 * 3 + 2 * (2 + 4) + 4 * 3);
    }

    #[test]
    fn test_constants_serialize() {
        let map = constants().unwrap_or_else(|e| panic!("derivation failed: {e}"));
        let json = serde_json::to_value(&map).unwrap_or_else(|e| panic!("serialize: {e}"));
        assert_eq!(json["week_to_year_div"], 8192);
    }
}
