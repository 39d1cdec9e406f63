use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    core::{
        battery::{Battery, BatteryConfig},
        interval::EnergyInterval,
        summary::{DailyResult, Ledger, Payback, SimulationResult},
        tariff::RateSchedule,
    },
    prelude::*,
    quantity::{energy::KilowattHours, proportions::Percentage},
};

/// Replay the metered intervals against an initially empty battery.
///
/// Intervals are processed in the given order: the caller is responsible for sorting them
/// chronologically. Unsorted or overlapping input is not detected.
#[instrument(skip_all, fields(n_intervals = intervals.len()))]
pub fn simulate(
    intervals: &[EnergyInterval],
    config: &BatteryConfig,
    schedule: &RateSchedule,
) -> SimulationResult {
    let mut battery = Battery::empty(config);
    debug!(usable_capacity = ?battery.usable_capacity(), efficiency = config.efficiency());
    let mut totals = Ledger::default();
    let mut days: HashMap<NaiveDate, Ledger> = HashMap::new();

    for interval in intervals {
        let ledger = apply(&mut battery, interval, schedule);
        totals += ledger;
        *days.entry(interval.interval.date()).or_default() += ledger;
    }

    let daily = days
        .into_iter()
        .map(|(date, ledger)| DailyResult { date, ledger })
        .sorted_by_key(|day| day.date)
        .collect_vec();
    aggregate(totals, daily, config)
}

/// Settle a single interval and return its contribution.
fn apply(battery: &mut Battery, interval: &EnergyInterval, schedule: &RateSchedule) -> Ledger {
    let rate = schedule.rate_for(interval.interval.start);
    let injection_rate = schedule.injection_rate;

    let mut ledger = Ledger {
        consumption: interval.consumption,
        injection: interval.injection,
        cost_without_battery: interval.consumption * rate - interval.injection * injection_rate,
        ..Ledger::default()
    };

    // Charging goes first, so the energy injected within an interval may cover the consumption
    // of the same interval. This nets both flows of the interval in one step, it is not meant
    // to order them in time.
    if interval.injection > KilowattHours::ZERO {
        let stored = battery.charge(interval.injection);
        ledger.battery_charged = stored;
        ledger.cost_with_battery -= (interval.injection - stored) * injection_rate;
    }

    if interval.consumption > KilowattHours::ZERO {
        let discharged = battery.discharge(interval.consumption);
        let purchased = interval.consumption - discharged;
        ledger.battery_discharged = discharged;
        ledger.grid_purchased = purchased;
        ledger.cost_with_battery += purchased * rate;
    }

    trace!(?interval.interval, level = ?battery.level(), cost = ?ledger.cost_with_battery);
    ledger
}

fn aggregate(totals: Ledger, daily: Vec<DailyResult>, config: &BatteryConfig) -> SimulationResult {
    // Intervals carry net grid flows only, so the production consumed on the spot is unknown.
    let direct_solar_use = KilowattHours::ZERO;
    let solar_production = totals.injection + direct_solar_use;

    let self_consumption_before = Percentage::of(direct_solar_use.0, solar_production.0);
    let self_consumption_after = Percentage::of(
        (direct_solar_use + totals.battery_discharged).min(solar_production).0,
        solar_production.0,
    );
    let grid_reduction =
        Percentage::of((totals.consumption - totals.grid_purchased).0, totals.consumption.0);

    let n_days = daily.len();
    #[expect(clippy::cast_precision_loss)]
    let annualization = if n_days == 0 { 1.0 } else { 365.0 / n_days as f64 };
    let annual_savings = totals.savings() * annualization;
    let payback = Payback::new(config.purchase_price, annual_savings);

    info!(
        n_days,
        savings = %totals.savings(),
        annual_savings = %annual_savings,
        %payback,
        "simulated",
    );

    SimulationResult {
        totals,
        n_days,
        annual_savings,
        payback,
        self_consumption_before,
        self_consumption_after,
        grid_reduction,
        daily,
    }
}
