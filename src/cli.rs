mod battery;
mod simulate;
mod tariff;

use clap::{Parser, Subcommand};

pub use self::{
    battery::BatteryArgs,
    simulate::{SimulateArgs, simulate},
    tariff::{TariffArgs, show_tariff},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay a meter export against a battery and estimate its payback.
    #[clap(name = "simulate")]
    Simulate(Box<SimulateArgs>),

    /// Show the hourly tariff schedule.
    #[clap(name = "tariff")]
    Tariff(TariffArgs),
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use clap::CommandFactory;

    use super::*;
    use crate::{
        core::BatteryConfig,
        quantity::{cost::Cost, energy::KilowattHours},
    };

    #[test]
    fn test_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let args = Args::try_parse_from([
            "battery-payback",
            "simulate",
            "--export",
            "export.csv",
            "--capacity-kwh",
            "10",
            "--purchase-price",
            "6000",
            "--daily",
        ])
        .unwrap();
        let Command::Simulate(args) = args.command else { panic!("expected `simulate`") };
        assert!(args.daily);
        assert!(!args.json);
        let config = args.battery.config().unwrap();
        assert_abs_diff_eq!(config.usable_energy().0, 10.0);
        assert_abs_diff_eq!(config.purchase_price.0, 6000.0);
        assert_abs_diff_eq!(config.efficiency(), 1.0);
    }

    #[test]
    fn test_battery_defaults_match_builder() {
        let args = BatteryArgs::try_parse_from([
            "battery",
            "--capacity-kwh",
            "10",
            "--purchase-price",
            "6000",
        ])
        .unwrap();
        let from_flags = args.config().unwrap();
        let from_builder = BatteryConfig::builder()
            .capacity(KilowattHours::from(10.0))
            .purchase_price(Cost::from(6000.0))
            .build();
        assert_abs_diff_eq!(from_flags.efficiency(), from_builder.efficiency());
        assert_abs_diff_eq!(from_flags.usable_energy().0, from_builder.usable_energy().0);
        assert_abs_diff_eq!(from_flags.lifespan_years, from_builder.lifespan_years);
    }
}
