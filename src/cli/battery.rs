use clap::Parser;

use crate::{
    core::BatteryConfig,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, proportions::Percentage},
};

#[derive(Copy, Clone, Parser)]
pub struct BatteryArgs {
    /// Nameplate battery capacity in kilowatt-hours.
    #[clap(long = "capacity-kwh", env = "BATTERY_CAPACITY_KWH")]
    pub capacity: KilowattHours,

    /// Share of the nameplate capacity which may be cycled (depth-of-discharge limit).
    #[clap(
        long = "usable-capacity-percent",
        default_value = "100",
        env = "BATTERY_USABLE_CAPACITY_PERCENT"
    )]
    pub usable_capacity: Percentage,

    /// Round-trip efficiency, lossless unless given.
    #[clap(
        long = "round-trip-efficiency-percent",
        default_value = "100",
        env = "BATTERY_ROUND_TRIP_EFFICIENCY_PERCENT"
    )]
    pub round_trip_efficiency: Percentage,

    /// Installed price in euro.
    #[clap(long = "purchase-price", env = "BATTERY_PURCHASE_PRICE")]
    pub purchase_price: Cost,

    /// Expected lifespan, only used to judge the payback.
    #[clap(long = "lifespan-years", default_value = "15", env = "BATTERY_LIFESPAN_YEARS")]
    pub lifespan_years: f64,
}

impl BatteryArgs {
    pub fn config(self) -> Result<BatteryConfig> {
        let config = BatteryConfig::builder()
            .capacity(self.capacity)
            .usable_capacity(self.usable_capacity)
            .round_trip_efficiency(self.round_trip_efficiency)
            .purchase_price(self.purchase_price)
            .lifespan_years(self.lifespan_years)
            .build();
        config.validate().context("invalid battery parameters")?;
        Ok(config)
    }
}
