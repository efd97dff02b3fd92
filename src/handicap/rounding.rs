//! All rounding used by the handicap rules.
//!
//! Half-way values round toward positive infinity (so `-3.45` becomes `-3.4`),
//! matching how published handicap tables are computed. Nothing else in the
//! crate rounds on its own.

/// Round to the nearest integer, halves toward positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Round to one decimal place, halves toward positive infinity.
#[must_use]
pub fn round_half_up_1dp(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Round to one decimal place; negative values move toward zero.
///
/// Used for score differentials: a better-than-rating round never gets
/// rounded in the player's favour.
#[must_use]
pub fn round_toward_zero_1dp(value: f64) -> f64 {
    if value < 0.0 {
        (value * 10.0).ceil() / 10.0
    } else {
        round_half_up_1dp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_up_rounds_halves_toward_positive_infinity() {
        assert_eq!(round_half_up(17.25), 17);
        assert_eq!(round_half_up(19.75), 20);
        assert_eq!(round_half_up(9.5), 10);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.2), -1);
        assert_eq!(round_half_up(-1.6), -2);
    }

    #[test]
    fn one_decimal_place() {
        assert_eq!(round_half_up_1dp(10.44), 10.4);
        assert_eq!(round_half_up_1dp(10.46), 10.5);
        assert_eq!(round_half_up_1dp(10.0), 10.0);
        assert_eq!(round_half_up_1dp(0.04), 0.0);
        assert_eq!(round_half_up_1dp(-3.46), -3.5);
    }

    #[test]
    fn negative_differentials_move_toward_zero() {
        assert_eq!(round_toward_zero_1dp(-3.476), -3.4);
        assert_eq!(round_toward_zero_1dp(-3.71), -3.7);
        assert_eq!(round_toward_zero_1dp(20.792), 20.8);
        assert_eq!(round_toward_zero_1dp(0.0), 0.0);
    }
}
