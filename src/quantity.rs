pub mod cost;
pub mod energy;
pub mod proportions;
pub mod rate;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<T, const POWER: isize, const TIME: isize, const COST: isize>(pub T);

impl<T, const POWER: isize, const TIME: isize, const COST: isize> Quantity<T, POWER, TIME, COST>
where
    Self: PartialOrd,
{
    #[must_use]
    pub fn min(mut self, rhs: Self) -> Self {
        if rhs < self {
            self = rhs;
        }
        self
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Quantity<f64, POWER, TIME, COST> {
    pub const ZERO: Self = Self(0.0);

    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl<T, const POWER: isize, const TIME: isize, const COST: isize> Mul<T>
    for Quantity<T, POWER, TIME, COST>
where
    T: Mul<T>,
{
    type Output = Quantity<T::Output, POWER, TIME, COST>;

    fn mul(self, rhs: T) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl<T, const POWER: isize, const TIME: isize, const COST: isize> Div<T>
    for Quantity<T, POWER, TIME, COST>
where
    T: Div<T>,
{
    type Output = Quantity<T::Output, POWER, TIME, COST>;

    fn div(self, rhs: T) -> Self::Output {
        Quantity(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::quantity::{cost::Cost, energy::KilowattHours};

    #[test]
    fn test_min_energy() {
        let headroom = KilowattHours::from(2.5);
        assert_eq!(KilowattHours::from(4.0).min(headroom), headroom);
        assert_eq!(KilowattHours::ZERO.min(headroom), KilowattHours::ZERO);
    }

    #[test]
    fn test_min_cost() {
        assert_eq!(Cost::from(-1.0).min(Cost::from(0.5)), Cost::from(-1.0));
    }

    #[test]
    fn test_sum_of_quarter_hours() {
        let quarter_hours = [0.065, 0.120, 0.015].map(KilowattHours::from);
        let total: KilowattHours = quarter_hours.into_iter().sum();
        assert_abs_diff_eq!(total.0, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_annualized_cost() {
        let savings = Cost::from(1.5) * (365.0 / 30.0);
        assert_abs_diff_eq!(savings.0, 18.25, epsilon = 1e-9);
        assert_abs_diff_eq!((savings / 365.0).0, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_is_finite() {
        assert!(KilowattHours::ZERO.is_finite());
        assert!(!KilowattHours::from(f64::NAN).is_finite());
        assert!(!Cost::from(f64::INFINITY).is_finite());
    }
}
