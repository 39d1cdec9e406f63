//! Quarter-hour export of the Fluvius digital meter portal.
//!
//! Semicolon-separated, Dutch headers, `DD-MM-YYYY` dates and decimal commas. Every quarter-hour
//! appears once per register: `Afname …` for the consumption and `Injectie …` for the
//! injection.

use std::{collections::BTreeMap, fs, path::Path};

use chrono::{NaiveDateTime, TimeDelta};
use csv::{ReaderBuilder, StringRecord, Trim};
use itertools::Itertools;

use crate::{
    core::{EnergyInterval, Interval},
    prelude::*,
    quantity::energy::KilowattHours,
};

const BYTE_ORDER_MARK: char = '\u{feff}';
const N_COLUMNS: usize = 9;

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_file(path: &Path) -> Result<Vec<EnergyInterval>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read the export `{}`", path.display()))?;
    let intervals = parse(&contents)?;
    info!(n_intervals = intervals.len(), "imported");
    Ok(intervals)
}

/// Parse the export and merge the registers into one interval per start time.
///
/// Rows with too few columns or unreadable timestamps are skipped, blank or unreadable volumes
/// count as zero. The result is sorted by the start time.
pub fn parse(contents: &str) -> Result<Vec<EnergyInterval>> {
    let contents = contents.strip_prefix(BYTE_ORDER_MARK).unwrap_or(contents);
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .from_reader(contents.as_bytes());

    let mut intervals = BTreeMap::<NaiveDateTime, EnergyInterval>::new();
    for record in reader.records() {
        let record = record.context("failed to read the export")?;
        let Some(row) = Row::from_record(&record) else {
            debug!(?record, "skipping a short row");
            continue;
        };
        let interval = match row.interval() {
            Ok(interval) => interval,
            Err(error) => {
                warn!(?record, "skipping a row: {error:#}");
                continue;
            }
        };
        if interval.duration() <= TimeDelta::zero() {
            warn!(?interval, "skipping an empty interval");
            continue;
        }
        let entry =
            intervals.entry(interval.start).or_insert_with(|| EnergyInterval::empty(interval));
        match Register::of(row.register) {
            Some(Register::Consumption) => entry.consumption = row.volume(),
            Some(Register::Injection) => entry.injection = row.volume(),
            None => trace!(register = row.register, "ignoring the register"),
        }
    }

    Ok(intervals.into_values().collect_vec())
}

struct Row<'a> {
    start_date: &'a str,
    start_time: &'a str,
    end_date: &'a str,
    end_time: &'a str,
    register: &'a str,
    volume: &'a str,
}

impl<'a> Row<'a> {
    fn from_record(record: &'a StringRecord) -> Option<Self> {
        if record.len() < N_COLUMNS {
            return None;
        }
        Some(Self {
            start_date: record.get(0)?,
            start_time: record.get(1)?,
            end_date: record.get(2)?,
            end_time: record.get(3)?,
            register: record.get(7)?,
            volume: record.get(8)?,
        })
    }

    fn interval(&self) -> Result<Interval> {
        Ok(Interval::new(
            parse_timestamp(self.start_date, self.start_time)?,
            parse_timestamp(self.end_date, self.end_time)?,
        ))
    }

    fn volume(&self) -> KilowattHours {
        KilowattHours::from(parse_volume(self.volume))
    }
}

enum Register {
    Consumption,
    Injection,
}

impl Register {
    fn of(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("afname") {
            Some(Self::Consumption)
        } else if name.contains("injectie") {
            Some(Self::Injection)
        } else {
            None
        }
    }
}

fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%d-%m-%Y %H:%M:%S")
        .with_context(|| format!("invalid timestamp `{date} {time}`"))
}

/// Blank volumes are reported for quarter-hours without any flow («Geen verbruik»).
///
/// Anything unreadable or non-finite counts as zero, so `NaN` never reaches the totals.
fn parse_volume(volume: &str) -> f64 {
    volume.replace(',', ".").parse().ok().filter(|value: &f64| value.is_finite()).unwrap_or(0.0)
}
