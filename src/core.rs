pub mod battery;
pub mod interval;
pub mod simulator;
pub mod summary;
pub mod tariff;

pub use self::{
    battery::BatteryConfig,
    interval::{EnergyInterval, Interval},
    simulator::simulate,
    summary::{DailyResult, Payback, SimulationResult},
    tariff::{DayKind, RateSchedule},
};
