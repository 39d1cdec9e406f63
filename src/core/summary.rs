use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use derive_more::{Add, AddAssign, Sum};
use serde::Serialize;

use crate::quantity::{cost::Cost, energy::KilowattHours, proportions::Percentage};

/// Energy flows and costs accumulated over a period.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Serialize, Add, AddAssign, Sum)]
pub struct Ledger {
    #[serde(rename = "consumption_kwh")]
    pub consumption: KilowattHours,

    #[serde(rename = "injection_kwh")]
    pub injection: KilowattHours,

    /// Energy diverted from the injection into the battery, before the efficiency loss.
    #[serde(rename = "battery_charged_kwh")]
    pub battery_charged: KilowattHours,

    #[serde(rename = "battery_discharged_kwh")]
    pub battery_discharged: KilowattHours,

    /// Consumption left to be bought from the grid with the battery in place.
    #[serde(rename = "grid_purchased_kwh")]
    pub grid_purchased: KilowattHours,

    pub cost_without_battery: Cost,
    pub cost_with_battery: Cost,
}

impl Ledger {
    pub fn savings(&self) -> Cost {
        self.cost_without_battery - self.cost_with_battery
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct DailyResult {
    pub date: NaiveDate,

    #[serde(flatten)]
    pub ledger: Ledger,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    Years(f64),

    /// The battery does not save anything.
    Never,
}

impl Payback {
    pub fn new(purchase_price: Cost, annual_savings: Cost) -> Self {
        if annual_savings > Cost::ZERO {
            Self::Years(purchase_price.0 / annual_savings.0)
        } else {
            Self::Never
        }
    }

    #[must_use]
    pub const fn years(self) -> Option<f64> {
        match self {
            Self::Years(years) => Some(years),
            Self::Never => None,
        }
    }

    /// Whether the battery pays for itself within the given number of years.
    #[must_use]
    pub fn within(self, years: f64) -> bool {
        self.years().is_some_and(|payback| payback <= years)
    }
}

impl Display for Payback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{years:.1} years"),
            Self::Never => write!(f, "never"),
        }
    }
}

#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    #[serde(flatten)]
    pub totals: Ledger,

    /// Number of distinct calendar days in the replayed data.
    pub n_days: usize,

    /// Savings over the replayed period, extrapolated to a year.
    pub annual_savings: Cost,

    pub payback: Payback,

    /// Share of the solar production consumed on site without the battery.
    pub self_consumption_before: Percentage,

    /// Share of the solar production consumed on site with the battery.
    pub self_consumption_after: Percentage,

    /// Reduction of the energy bought from the grid.
    pub grid_reduction: Percentage,

    /// One entry per calendar day, sorted by date.
    pub daily: Vec<DailyResult>,
}

impl SimulationResult {
    /// Savings over the replayed period.
    pub fn savings(&self) -> Cost {
        self.totals.savings()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_payback_years() {
        let payback = Payback::new(Cost::from(3000.0), Cost::from(600.0));
        assert_abs_diff_eq!(payback.years().unwrap(), 5.0);
        assert!(payback.within(5.0));
        assert!(!payback.within(4.9));
    }

    #[test]
    fn test_payback_never() {
        assert_eq!(Payback::new(Cost::from(3000.0), Cost::ZERO), Payback::Never);
        assert_eq!(Payback::new(Cost::from(3000.0), Cost::from(-1.0)), Payback::Never);
        assert!(!Payback::Never.within(f64::MAX));
    }

    #[test]
    fn test_payback_serialization() {
        assert_eq!(serde_json::to_string(&Payback::Never).unwrap(), r#""never""#);
        assert_eq!(serde_json::to_string(&Payback::Years(2.5)).unwrap(), r#"{"years":2.5}"#);
    }

    #[test]
    fn test_ledger_sum() {
        let ledger = Ledger {
            consumption: KilowattHours::from(1.0),
            cost_without_battery: Cost::from(0.35),
            cost_with_battery: Cost::from(0.1),
            ..Ledger::default()
        };
        let total: Ledger = [ledger, ledger].into_iter().sum();
        assert_abs_diff_eq!(total.consumption.0, 2.0);
        assert_abs_diff_eq!(total.savings().0, 0.5);
    }
}
