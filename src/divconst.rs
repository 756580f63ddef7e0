use crate::prelude::*;
use serde::Serialize;

/// Error type for division-constant derivations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DivConstError {
    /// Division by 0 or 1 needs no multiplier.
    #[error("divisor must be greater than 1, got {0}")]
    DivisorTooSmall(u128),

    /// `prec` must lie in `(1, bits]`.
    #[error("precision {prec} out of range (2..={bits})")]
    PrecisionOutOfRange { prec: u32, bits: u32 },

    /// The divisor does not fit the requested word width (or the u128
    /// workspace the derivation runs in).
    #[error("divisor needs {needed} bits, word width is {bits}")]
    DivisorTooWide { needed: u32, bits: u32 },

    /// No multiplier exists between the scaled reciprocal bounds; the
    /// requested precision is insufficient for this divisor/width pair.
    #[error("empty convergent range for divisor {divisor} at {bits}/{prec} bits")]
    EmptyConvergent { divisor: u128, bits: u32, prec: u32 },
}

/// Multiply-shift replacement constants for division by a fixed divisor,
/// after Granlund & Montgomery.  `x / divisor` becomes
/// `(x * ((m_high << word_bits) + m_low)) >> (word_bits + post_shift)`,
/// exact for all `x` below two to the requested precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[display(fmt = "({m_high}, {m_low}, {post_shift}, {divisor_bits})")]
pub struct MagicDiv {
    /// Multiplier bits above the word (0 or 1)
    pub m_high: u128,
    /// Multiplier modulo the word
    pub m_low: u128,
    /// Right shift applied after the word-discarding shift
    pub post_shift: u32,
    /// `ceil(log2(divisor))`
    pub divisor_bits: u32,
    /// Word width the constants were derived for
    pub word_bits: u32,
}

impl MagicDiv {
    /// The full multiplier, high word included.
    pub const fn multiplier(&self) -> u128 {
        (self.m_high << self.word_bits) | self.m_low
    }

    /// Applies the constants: `(x * multiplier) >> (word_bits + post_shift)`,
    /// evaluated as `(x * m_high + ((x * m_low) >> word_bits)) >> post_shift`
    /// so the intermediate fits u128 for any word width up to 64 bits.
    pub const fn divide(&self, x: u128) -> u128 {
        let hi = (x * self.m_low) >> self.word_bits;
        (x * self.m_high + hi) >> self.post_shift
    }
}

/// `floor(log2(x))`, 0 at 0.
pub const fn log2_floor(x: u128) -> u32 {
    if x == 0 { 0 } else { 127 - x.leading_zeros() }
}

/// `ceil(log2(x))`, 0 at 0.
pub const fn log2_ceil(x: u128) -> u32 {
    if x == 0 { 0 } else { 128 - (x - 1).leading_zeros() }
}

/// Derives multiply-shift constants replacing division by `divisor` for
/// dividends of `bits` bits, exact up to `prec` bits of dividend.
///
/// With `reduce` set, the multiplier is narrowed where possible: the
/// looped test-and-shift from the paper collapses to a constant-time shift
/// by the bit length of `m_h XOR m_l`, clamped to the post shift.
///
/// # Errors
/// See [`DivConstError`]; every variant is a parameter-design defect, not a
/// runtime condition.
pub fn choose_multiplier(
    divisor: u128,
    bits: u32,
    prec: u32,
    reduce: bool,
) -> Result<MagicDiv, DivConstError> {
    if divisor < 2 {
        return Err(DivConstError::DivisorTooSmall(divisor));
    }
    if prec < 2 || prec > bits {
        return Err(DivConstError::PrecisionOutOfRange { prec, bits });
    }
    let l = log2_ceil(divisor);
    if l > bits || bits + l > 127 {
        return Err(DivConstError::DivisorTooWide { needed: l, bits });
    }

    let mut shift = l;
    let m_l = (1_u128 << (bits + l)) / divisor;
    let mut m_h = ((1_u128 << (bits + l)) + (1_u128 << (bits + l - prec))) / divisor;
    if m_h <= m_l {
        return Err(DivConstError::EmptyConvergent { divisor, bits, prec });
    }

    if reduce {
        // m_h > m_l, so the XOR is non-zero and its bit length is the
        // highest position where the bounds disagree; shifting past it
        // cannot change which multiplier the quotient picks
        let red = log2_floor(m_h ^ m_l).min(l);
        m_h >>= red;
        shift -= red;
    }

    Ok(MagicDiv {
        m_high: m_h >> bits,
        m_low: m_h & ((1_u128 << bits) - 1),
        post_shift: shift,
        divisor_bits: l,
        word_bits: bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log2_floor() {
        assert_eq!(log2_floor(0), 0);
        assert_eq!(log2_floor(1), 0);
        assert_eq!(log2_floor(2), 1);
        assert_eq!(log2_floor(3), 1);
        assert_eq!(log2_floor(4), 2);
        assert_eq!(log2_floor(7), 2);
        assert_eq!(log2_floor(8), 3);
    }

    #[test]
    fn test_log2_ceil() {
        assert_eq!(log2_ceil(0), 0);
        assert_eq!(log2_ceil(1), 0);
        assert_eq!(log2_ceil(2), 1);
        assert_eq!(log2_ceil(3), 2);
        assert_eq!(log2_ceil(4), 2);
        assert_eq!(log2_ceil(5), 3);
        assert_eq!(log2_ceil(8), 3);
    }

    #[test]
    fn test_parameter_validation() {
        assert!(matches!(
            choose_multiplier(1, 32, 18, true),
            Err(DivConstError::DivisorTooSmall(1))
        ));
        assert!(matches!(
            choose_multiplier(1461, 32, 1, true),
            Err(DivConstError::PrecisionOutOfRange { .. })
        ));
        assert!(matches!(
            choose_multiplier(1461, 32, 33, true),
            Err(DivConstError::PrecisionOutOfRange { .. })
        ));
        assert!(matches!(
            choose_multiplier(1461, 8, 4, true),
            Err(DivConstError::DivisorTooWide { needed: 11, bits: 8 })
        ));
    }

    fn derive(divisor: u128, bits: u32, prec: u32, reduce: bool) -> MagicDiv {
        choose_multiplier(divisor, bits, prec, reduce)
            .unwrap_or_else(|e| panic!("derivation failed: {e}"))
    }

    #[test]
    fn test_known_constants() {
        let m = derive(1461, 32, 18, true);
        assert_eq!((m.m_high, m.m_low, m.post_shift, m.divisor_bits), (0, 2_939_756, 0, 11));

        let m = derive(1461, 32, 31, true);
        assert_eq!((m.m_high, m.m_low, m.post_shift, m.divisor_bits), (0, 376_287_347, 7, 11));

        let m = derive(7, 64, 64, true);
        assert_eq!(
            (m.m_high, m.m_low, m.post_shift, m.divisor_bits),
            (1, 2_635_249_153_387_078_803, 3, 3)
        );

        let m = derive(146_097, 33, 33, true);
        assert_eq!((m.m_high, m.m_low, m.post_shift, m.divisor_bits), (0, 7_706_523_111, 17, 18));
    }

    #[test]
    fn test_divide_top_of_64bit_word() {
        // the multiplier for d=7 at 64 bits has its 65th bit set; the split
        // evaluation must still cover dividends at the very top of the word
        let m = derive(7, 64, 64, true);
        assert_eq!(m.multiplier(), (1 << 64) | 2_635_249_153_387_078_803);
        let top = u64::MAX as u128;
        for x in [top, top - 1, top - 6, 1 << 63, (1 << 63) - 1, 7, 6, 0] {
            assert_eq!(m.divide(x), x / 7, "x={x}");
        }
        for k in (top / 7 - 3)..=(top / 7) {
            let edge = k * 7;
            assert_eq!(m.divide(edge), k, "edge={edge}");
            assert_eq!(m.divide(edge - 1), k - 1);
        }
    }

    #[test]
    fn test_unreduced_constants() {
        // without the narrowing pass the post shift stays at divisor_bits
        let m = derive(1461, 32, 18, false);
        assert_eq!((m.m_high, m.m_low, m.post_shift, m.divisor_bits), (1, 1_725_653_221, 11, 11));

        let m = derive(146_097, 33, 33, false);
        assert_eq!((m.m_high, m.m_low, m.post_shift, m.divisor_bits), (1, 6_823_111_630, 18, 18));
    }

    #[test]
    fn test_exact_up_to_precision_1461() {
        // prec=18 keeps the multiplier narrow at the cost of range: the
        // constants are exact for every dividend below 2^18 (and a bit
        // beyond), not over the full 32-bit word
        let m = derive(1461, 32, 18, true);
        for x in 0..(1_u128 << 18) {
            assert_eq!(m.divide(x), x / 1461, "x={x}");
        }
    }

    #[test]
    fn test_full_width_1461() {
        let m = derive(1461, 32, 31, true);
        let top = 1_u128 << 32;
        // sparse deterministic sweep
        for x in (0..top).step_by(32_768 + 1) {
            assert_eq!(m.divide(x), x / 1461, "x={x}");
        }
        // every multiple of the divisor, one off either side
        for k in 0..top / 1461 {
            let edge = k * 1461;
            for x in [edge.saturating_sub(1), edge, edge + 1] {
                if x < top {
                    assert_eq!(m.divide(x), x / 1461, "x={x}");
                }
            }
        }
        assert_eq!(m.divide(top - 1), (top - 1) / 1461);
    }

    #[test]
    fn test_full_width_146097() {
        let m = derive(146_097, 33, 33, true);
        let top = 1_u128 << 33;
        for x in (0..top).step_by(65_536 + 1) {
            assert_eq!(m.divide(x), x / 146_097, "x={x}");
        }
        for k in 0..top / 146_097 {
            let edge = k * 146_097;
            for x in [edge.saturating_sub(1), edge, edge + 1] {
                if x < top {
                    assert_eq!(m.divide(x), x / 146_097, "x={x}");
                }
            }
        }
        assert_eq!(m.divide(top - 1), (top - 1) / 146_097);
    }

    #[test]
    fn test_display_and_serde() {
        let m = derive(1461, 32, 18, true);
        assert_eq!(m.to_string(), "(0, 2939756, 0, 11)");
        let json = serde_json::to_value(m).unwrap_or_else(|e| panic!("serialize: {e}"));
        assert_eq!(json["m_low"], 2_939_756);
        assert_eq!(json["post_shift"], 0);
    }
}
