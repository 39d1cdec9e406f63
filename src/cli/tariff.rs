use std::path::PathBuf;

use clap::Parser;

use crate::{core::RateSchedule, prelude::*, tables::build_schedule_table};

#[derive(Parser)]
pub struct TariffArgs {
    /// TOML tariff schedule, the built-in three-tier tariff is used when omitted.
    #[clap(long = "tariff", env = "TARIFF_PATH")]
    pub path: Option<PathBuf>,
}

impl TariffArgs {
    pub fn load(&self) -> Result<RateSchedule> {
        self.path.as_deref().map_or_else(|| Ok(RateSchedule::default()), RateSchedule::read_from)
    }
}

pub fn show_tariff(args: &TariffArgs) -> Result {
    let schedule = args.load()?;
    println!("{}", build_schedule_table(&schedule));
    Ok(())
}
