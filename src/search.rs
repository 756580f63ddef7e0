use crate::ratio::{Ratio, SlopeInterval, gcd};

/// Brute-force enumeration of candidate slopes inside `interval`, ordered
/// by denominator from 1 up to (excluding) `limit`.  Only fully reduced
/// fractions are produced; a reducible pair was already seen at a smaller
/// denominator.
pub fn bounded_slopes(interval: SlopeInterval, limit: i128) -> impl Iterator<Item = Ratio> {
    (1..limit).flat_map(move |den| {
        let lo = interval.min.ceil_scaled(den);
        let hi = interval.max.ceil_scaled(den);
        (lo..hi)
            .filter(move |num| gcd(*num, den) == 1)
            .map(move |num| Ratio::new(num, den))
    })
}

/// Candidate slopes inside `interval` whose denominator is a power of two,
/// 2^0 through 2^63.  Only odd numerators are produced: an even numerator
/// over a power of two reduces to a smaller power already delivered.
pub fn power_of_two_slopes(interval: SlopeInterval) -> impl Iterator<Item = Ratio> {
    (0..64).map(|p| 1_i128 << p).flat_map(move |den| {
        let lo = interval.min.ceil_scaled(den);
        let hi = interval.max.ceil_scaled(den);
        (lo..hi)
            .filter(|num| num & 1 == 1)
            .map(move |num| Ratio::new(num, den))
    })
}
