use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{BatteryConfig, DailyResult, DayKind, Payback, RateSchedule, SimulationResult},
    quantity::{cost::Cost, energy::KilowattHours},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn savings_color(savings: Cost) -> Color {
    if savings.0 > 0.0 { Color::Green } else { Color::Red }
}

#[must_use]
pub fn build_summary_table(result: &SimulationResult, config: &BatteryConfig) -> Table {
    let payback_color = match result.payback {
        Payback::Years(_) if result.payback.within(config.lifespan_years) => Color::Green,
        Payback::Years(_) => Color::DarkYellow,
        Payback::Never => Color::Red,
    };
    let mut table = new_table();
    table.set_header(vec![
        Cell::from("Days"),
        Cell::from("Consumption"),
        Cell::from("Injection"),
        Cell::from("Cost\nwithout"),
        Cell::from("Cost\nwith"),
        Cell::from("Savings"),
        Cell::from("Annual\nsavings").add_attribute(Attribute::Bold),
        Cell::from("Payback").add_attribute(Attribute::Bold),
        Cell::from("Self-\nconsumption"),
        Cell::from("Grid\nreduction"),
    ]);
    table.add_row(vec![
        Cell::new(result.n_days).set_alignment(CellAlignment::Right),
        Cell::new(result.totals.consumption).set_alignment(CellAlignment::Right),
        Cell::new(result.totals.injection).set_alignment(CellAlignment::Right),
        Cell::new(result.totals.cost_without_battery).set_alignment(CellAlignment::Right),
        Cell::new(result.totals.cost_with_battery).set_alignment(CellAlignment::Right),
        Cell::new(result.savings()).set_alignment(CellAlignment::Right),
        Cell::new(result.annual_savings)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(savings_color(result.annual_savings)),
        Cell::new(result.payback).add_attribute(Attribute::Bold).fg(payback_color),
        Cell::new(format!(
            "{} → {}",
            result.self_consumption_before, result.self_consumption_after
        )),
        Cell::new(result.grid_reduction).set_alignment(CellAlignment::Right),
    ]);
    table
}

#[must_use]
pub fn build_daily_table(daily: &[DailyResult]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Date",
        "Consumption",
        "Injection",
        "Charged",
        "Discharged",
        "Grid",
        "Cost\nwithout",
        "Cost\nwith",
        "Savings",
    ]);
    for day in daily {
        let ledger = &day.ledger;
        let energy = |value: KilowattHours| Cell::new(value).set_alignment(CellAlignment::Right);
        table.add_row(vec![
            Cell::new(day.date.format("%a %d-%m-%Y")),
            energy(ledger.consumption),
            energy(ledger.injection),
            energy(ledger.battery_charged).fg(Color::Green),
            energy(ledger.battery_discharged).fg(Color::Blue),
            energy(ledger.grid_purchased),
            Cell::new(ledger.cost_without_battery).set_alignment(CellAlignment::Right),
            Cell::new(ledger.cost_with_battery).set_alignment(CellAlignment::Right),
            Cell::new(ledger.savings())
                .set_alignment(CellAlignment::Right)
                .fg(savings_color(ledger.savings())),
        ]);
    }
    table
}

#[must_use]
pub fn build_schedule_table(schedule: &RateSchedule) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::from("Hour"),
        Cell::from(DayKind::Weekday),
        Cell::from(DayKind::Weekend),
    ]);
    for hour in 0..24 {
        let mut row = vec![Cell::new(format!("{hour:02}:00"))];
        for kind in DayKind::ALL {
            let tier = schedule.hours(kind).get(hour).and_then(|id| schedule.tier(id));
            row.push(match tier {
                Some(tier) => {
                    let cell = Cell::new(format!("{} ({})", tier.name, tier.rate));
                    match tier.color.as_deref().and_then(parse_hex_color) {
                        Some(color) => cell.fg(color),
                        None => cell,
                    }
                }
                None => Cell::new("n/a").add_attribute(Attribute::Dim),
            });
        }
        table.add_row(row);
    }
    table.add_row(vec![
        Cell::new("Injection").add_attribute(Attribute::Bold),
        Cell::new(schedule.injection_rate),
        Cell::new(schedule.injection_rate),
    ]);
    table
}

/// Parse `#RRGGBB` notation.
fn parse_hex_color(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
    Some(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF6B6B"), Some(Color::Rgb { r: 255, g: 107, b: 107 }));
        assert_eq!(parse_hex_color("FF6B6B"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn test_schedule_table_lists_every_hour() {
        let table = build_schedule_table(&RateSchedule::default());
        assert_eq!(table.row_iter().count(), 25);
    }

    #[test]
    fn test_summary_table_shows_self_consumption_change() {
        let config = BatteryConfig::builder().capacity(KilowattHours::from(10.0)).build();
        let result = crate::core::simulate(&[], &config, &RateSchedule::default());
        let rendered = build_summary_table(&result, &config).to_string();
        assert!(rendered.contains("0.0 % → 0.0 %"), "{rendered}");
        assert!(rendered.contains("never"), "{rendered}");
    }
}
