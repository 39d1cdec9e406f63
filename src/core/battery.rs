use bon::Builder;
use serde::Serialize;

use crate::{
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, proportions::Percentage},
};

#[must_use]
#[derive(Copy, Clone, Debug, Builder, Serialize)]
pub struct BatteryConfig {
    /// Nameplate capacity.
    pub capacity: KilowattHours,

    /// Share of the nameplate capacity which may actually be cycled.
    #[builder(default = Percentage::HUNDRED)]
    pub usable_capacity: Percentage,

    /// Share of the stored energy which comes back out, applied when charging.
    ///
    /// Lossless by default, here and on the command line alike.
    #[builder(default = Percentage::HUNDRED)]
    pub round_trip_efficiency: Percentage,

    #[builder(default = Cost::ZERO)]
    pub purchase_price: Cost,

    /// Informational, the simulation does not model degradation.
    #[builder(default = 15.0)]
    pub lifespan_years: f64,
}

impl BatteryConfig {
    pub fn validate(&self) -> Result {
        ensure!(
            self.capacity.is_finite() && self.capacity >= KilowattHours::ZERO,
            "invalid battery capacity: {}",
            self.capacity,
        );
        ensure!(
            self.usable_capacity.is_valid(),
            "usable capacity must be within 0..=100%, got {}",
            self.usable_capacity,
        );
        ensure!(
            self.round_trip_efficiency.is_valid(),
            "round-trip efficiency must be within 0..=100%, got {}",
            self.round_trip_efficiency,
        );
        ensure!(
            self.purchase_price.is_finite() && self.purchase_price >= Cost::ZERO,
            "invalid purchase price: {}",
            self.purchase_price,
        );
        ensure!(
            self.lifespan_years.is_finite() && self.lifespan_years >= 0.0,
            "invalid lifespan: {} years",
            self.lifespan_years,
        );
        Ok(())
    }

    pub fn usable_energy(&self) -> KilowattHours {
        self.capacity * self.usable_capacity.to_proportion()
    }

    #[must_use]
    pub const fn efficiency(&self) -> f64 {
        self.round_trip_efficiency.to_proportion()
    }
}

/// Battery state during a single simulation run.
///
/// The level stays within `0..=usable_capacity`: charging is capped by the headroom
/// and discharging by the level itself.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Battery {
    usable_capacity: KilowattHours,
    efficiency: f64,
    level: KilowattHours,
}

impl Battery {
    pub fn empty(config: &BatteryConfig) -> Self {
        Self {
            usable_capacity: config.usable_energy(),
            efficiency: config.efficiency(),
            level: KilowattHours::ZERO,
        }
    }

    pub const fn level(&self) -> KilowattHours {
        self.level
    }

    pub const fn usable_capacity(&self) -> KilowattHours {
        self.usable_capacity
    }

    pub fn headroom(&self) -> KilowattHours {
        self.usable_capacity - self.level
    }

    /// Store as much of the offered energy as fits.
    ///
    /// Returns the energy taken from the offer, before the efficiency loss.
    pub fn charge(&mut self, offered: KilowattHours) -> KilowattHours {
        let taken = offered.min(self.headroom());
        self.level = (self.level + taken * self.efficiency).min(self.usable_capacity);
        taken
    }

    /// Cover as much of the requested energy as is stored.
    pub fn discharge(&mut self, requested: KilowattHours) -> KilowattHours {
        let discharged = requested.min(self.level);
        self.level -= discharged;
        discharged
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn config() -> BatteryConfig {
        BatteryConfig::builder().capacity(KilowattHours::from(10.0)).build()
    }

    #[test]
    fn test_usable_capacity() {
        let config = BatteryConfig::builder()
            .capacity(KilowattHours::from(10.0))
            .usable_capacity(Percentage(90.0))
            .build();
        assert_abs_diff_eq!(config.usable_energy().0, 9.0);
    }

    #[test]
    fn test_lossless_charge() {
        let mut battery = Battery::empty(&config());
        assert_eq!(battery.charge(KilowattHours::from(2.0)), KilowattHours::from(2.0));
        assert_eq!(battery.level(), KilowattHours::from(2.0));
    }

    #[test]
    fn test_charge_is_capped_by_headroom() {
        let mut battery = Battery::empty(&config());
        assert_eq!(battery.charge(KilowattHours::from(15.0)), KilowattHours::from(10.0));
        assert_eq!(battery.level(), KilowattHours::from(10.0));
        assert_eq!(battery.charge(KilowattHours::from(1.0)), KilowattHours::ZERO);
    }

    #[test]
    fn test_efficiency_is_applied_on_charge() {
        let config = BatteryConfig::builder()
            .capacity(KilowattHours::from(10.0))
            .round_trip_efficiency(Percentage(90.0))
            .build();
        let mut battery = Battery::empty(&config);
        assert_eq!(battery.charge(KilowattHours::from(5.0)), KilowattHours::from(5.0));
        assert_abs_diff_eq!(battery.level().0, 4.5);
        assert_abs_diff_eq!(battery.discharge(KilowattHours::from(5.0)).0, 4.5);
        assert_eq!(battery.level(), KilowattHours::ZERO);
    }

    #[test]
    fn test_discharge_is_capped_by_level() {
        let mut battery = Battery::empty(&config());
        battery.charge(KilowattHours::from(3.0));
        assert_eq!(battery.discharge(KilowattHours::from(1.0)), KilowattHours::from(1.0));
        assert_eq!(battery.discharge(KilowattHours::from(5.0)), KilowattHours::from(2.0));
        assert_eq!(battery.discharge(KilowattHours::from(5.0)), KilowattHours::ZERO);
    }

    #[test]
    fn test_zero_capacity() {
        let config = BatteryConfig::builder().capacity(KilowattHours::ZERO).build();
        let mut battery = Battery::empty(&config);
        assert_eq!(battery.charge(KilowattHours::from(1.0)), KilowattHours::ZERO);
        assert_eq!(battery.discharge(KilowattHours::from(1.0)), KilowattHours::ZERO);
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());
        let invalid = BatteryConfig::builder()
            .capacity(KilowattHours::from(10.0))
            .round_trip_efficiency(Percentage(120.0))
            .build();
        assert!(invalid.validate().is_err());
        let invalid = BatteryConfig::builder().capacity(KilowattHours::from(-1.0)).build();
        assert!(invalid.validate().is_err());
    }
}
