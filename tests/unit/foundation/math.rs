use super::*;

#[test]
fn div_round_rounds_halves_up() {
    assert_eq!(div_round(0, 3), 0);
    assert_eq!(div_round(5, 2), 3);
    assert_eq!(div_round(7, 2), 4);
    assert_eq!(div_round(10, 4), 3);
    assert_eq!(div_round(9, 4), 2);
    assert_eq!(div_round(11, 4), 3);
    assert_eq!(div_round(1600, 3), 533);
}

#[test]
fn half_round_matches_div_round() {
    for d in 0u64..64 {
        assert_eq!(u128::from(half_round(d)), div_round(u128::from(d), 2));
    }
}

#[test]
fn mul_div255_identities() {
    for x in [0u16, 1, 127, 255] {
        assert_eq!(mul_div255_u16(x, 255), x);
        assert_eq!(mul_div255_u16(x, 0), 0);
    }
    assert_eq!(mul_div255_u16(128, 128), 64);
}
