/// `round(num / den)` with halves rounded away from zero.
///
/// Operands are non-negative, so "away from zero" is "up". `den` must be non-zero.
pub(crate) fn div_round(num: u128, den: u128) -> u128 {
    debug_assert!(den > 0);
    (2 * num + den) / (2 * den)
}

/// `round(d / 2)`, the centering offset of a span of `d` spare pixels.
pub(crate) fn half_round(d: u64) -> u64 {
    d / 2 + d % 2
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
