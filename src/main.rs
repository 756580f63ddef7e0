//! Derivation report: runs every calendar-constant derivation and prints
//! the results in the order the generated header expects them.

use calmagic::{
    BoundsMode, DAY_SEARCH_LIMIT, MONTH_SEARCH_LIMIT, MonthOrder, StepTable, WEEK_SEARCH_LIMIT,
    YEAR_SEARCH_LIMIT, YEARS_PER_CENTURY, century_week_tables, choose_multiplier,
    isoweek_yearstart, month_days, print_header, print_solution, solve,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    print_header("months to days, unshifted calendar, February with 30 days");
    let sol = solve_one(month_days(MonthOrder::JanuaryFirst), MONTH_SEARCH_LIMIT)?;
    print_solution(&sol);

    print_header("days to months, unshifted calendar, February with 30 days");
    let sol = solve_one(month_days(MonthOrder::JanuaryFirst).transposed(), DAY_SEARCH_LIMIT)?;
    print_solution(&sol);

    print_header("months to days, shifted calendar");
    let sol = solve_one(month_days(MonthOrder::MarchFirst), MONTH_SEARCH_LIMIT)?;
    print_solution(&sol);

    print_header("days to months, shifted calendar");
    let sol = solve_one(month_days(MonthOrder::MarchFirst).transposed(), DAY_SEARCH_LIMIT)?;
    print_solution(&sol);

    print_header("length of centuries in ISO8601 week calendar");
    for c in 0..4 {
        let len = isoweek_yearstart((c + 1) * YEARS_PER_CENTURY + 1)
            - isoweek_yearstart(c * YEARS_PER_CENTURY + 1);
        println!("length of {c}. century = {len}");
    }

    let centuries = century_week_tables();

    print_header("ISO8601 week calendar, years in century to weeks");
    let sol = solve(&centuries, YEAR_SEARCH_LIMIT, BoundsMode::Pairwise)?;
    print_solution(&sol);

    print_header("ISO8601 week calendar, weeks in century to years");
    let transposed: Vec<StepTable> = centuries.iter().map(StepTable::transposed).collect();
    let sol = solve(&transposed, WEEK_SEARCH_LIMIT, BoundsMode::Pairwise)?;
    print_solution(&sol);

    print_header("division constants");
    println!("{}", choose_multiplier(1461, 32, 18, true)?);
    println!("{}", choose_multiplier(1461, 32, 31, true)?);
    let m = choose_multiplier(7, 64, 64, true)?;
    println!("({:#x}, {:#x}, {:#x}, {:#x})", m.m_high, m.m_low, m.post_shift, m.divisor_bits);
    println!("{}", choose_multiplier(146_097, 33, 33, true)?);

    Ok(())
}

fn solve_one(
    table: StepTable,
    limit: i128,
) -> Result<calmagic::Solution, calmagic::SolveError> {
    solve(std::slice::from_ref(&table), limit, BoundsMode::Pairwise)
}
