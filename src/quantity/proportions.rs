use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Percentage of a whole, `0..=100` for physically meaningful values.
#[derive(
    Copy,
    Clone,
    Default,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct Percentage(pub f64);

impl Percentage {
    pub const ZERO: Self = Self(0.0);
    pub const HUNDRED: Self = Self(100.0);

    pub const fn to_proportion(self) -> f64 {
        0.01 * self.0
    }

    /// Express `part` as a percentage of `whole`, or zero when `whole` is not positive.
    pub fn of(part: f64, whole: f64) -> Self {
        if whole > 0.0 { Self(part / whole * 100.0) } else { Self::ZERO }
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && (0.0..=100.0).contains(&self.0)
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} %", self.0)
    }
}

impl Debug for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_to_proportion() {
        assert_abs_diff_eq!(Percentage(90.0).to_proportion(), 0.9);
    }

    #[test]
    fn test_of_zero_whole() {
        assert_eq!(Percentage::of(1.0, 0.0), Percentage::ZERO);
    }

    #[test]
    fn test_is_valid() {
        assert!(Percentage(0.0).is_valid());
        assert!(Percentage(100.0).is_valid());
        assert!(!Percentage(100.5).is_valid());
        assert!(!Percentage(f64::NAN).is_valid());
    }
}
