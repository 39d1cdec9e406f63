use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{BatteryArgs, TariffArgs},
    core::simulate as run_simulation,
    ingest::fluvius,
    prelude::*,
    tables::{build_daily_table, build_summary_table},
};

#[derive(Parser)]
pub struct SimulateArgs {
    /// Fluvius quarter-hour export (CSV).
    #[clap(long = "export", env = "EXPORT_PATH")]
    pub export: PathBuf,

    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub tariff: TariffArgs,

    /// Also show the daily breakdown.
    #[clap(long)]
    pub daily: bool,

    /// Print the full result as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

#[instrument(skip_all)]
pub fn simulate(args: &SimulateArgs) -> Result {
    let config = args.battery.config()?;
    let schedule = args.tariff.load()?;
    let intervals = fluvius::read_file(&args.export)?;
    ensure!(!intervals.is_empty(), "the export `{}` holds no intervals", args.export.display());

    let result = run_simulation(&intervals, &config, &schedule);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if args.daily {
        println!("{}", build_daily_table(&result.daily));
    }
    println!("{}", build_summary_table(&result, &config));
    Ok(())
}
