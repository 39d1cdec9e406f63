use std::{
    collections::HashSet,
    fmt::{Debug, Display, Formatter},
    fs,
    path::Path,
};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::rate::KilowattHourRate};

#[derive(
    Clone,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TierId(String);

impl AsRef<str> for TierId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TierId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Debug for TierId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Named pricing bracket applied to the energy bought from the grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TariffTier {
    pub id: TierId,
    pub name: String,

    #[serde(rename = "rate_per_kwh")]
    pub rate: KilowattHourRate,

    /// Presentation hint in `#RRGGBB` notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TariffTier {
    fn new(id: &str, name: &str, rate: f64, color: &str) -> Self {
        Self {
            id: TierId::from(id),
            name: name.to_owned(),
            rate: KilowattHourRate::from(rate),
            color: Some(color.to_owned()),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DayKind {
    Weekday,
    Weekend,
}

impl DayKind {
    pub const ALL: [Self; 2] = [Self::Weekday, Self::Weekend];

    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }
}

impl Display for DayKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekday => write!(f, "Weekday"),
            Self::Weekend => write!(f, "Weekend"),
        }
    }
}

/// Tier identifiers indexed by the hour of the day.
///
/// Hours past the end of the list do not resolve to any tier.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlySchedule(Vec<TierId>);

impl HourlySchedule {
    fn from_ids(ids: [&str; 24]) -> Self {
        Self(ids.into_iter().map(TierId::from).collect())
    }

    #[must_use]
    pub fn get(&self, hour: u32) -> Option<&TierId> {
        self.0.get(hour as usize)
    }
}

/// Time-of-use tariff: which tier applies at which hour, and what each tier costs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Flat credit for the injected energy, independent of the tier.
    #[serde(rename = "injection_rate_per_kwh")]
    pub injection_rate: KilowattHourRate,

    pub weekday: HourlySchedule,
    pub weekend: HourlySchedule,
    pub tiers: Vec<TariffTier>,
}

impl Default for RateSchedule {
    /// Three-tier residential tariff.
    ///
    /// Weekdays: super-dal overnight (1–6), dal around midday (11–16) and late evening
    /// (22–0), peak otherwise. Weekends never hit peak: midday drops to super-dal, the rest
    /// is dal.
    fn default() -> Self {
        const PEAK: &str = "peak";
        const DAL: &str = "dal";
        const SUPER_DAL: &str = "super-dal";

        #[rustfmt::skip]
        let weekday = HourlySchedule::from_ids([
            DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL,
            PEAK, PEAK, PEAK, PEAK,
            DAL, DAL, DAL, DAL, DAL, DAL,
            PEAK, PEAK, PEAK, PEAK, PEAK,
            DAL, DAL,
        ]);

        #[rustfmt::skip]
        let weekend = HourlySchedule::from_ids([
            DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL,
            DAL, DAL, DAL, DAL,
            SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL, SUPER_DAL,
            DAL, DAL, DAL, DAL, DAL,
            DAL, DAL,
        ]);

        Self {
            injection_rate: KilowattHourRate::from(0.05),
            weekday,
            weekend,
            tiers: vec![
                TariffTier::new(PEAK, "Peak", 0.35, "#FF6B6B"),
                TariffTier::new(DAL, "Dal", 0.28, "#4DABF7"),
                TariffTier::new(SUPER_DAL, "Super-dal", 0.19, "#51CF66"),
            ],
        }
    }
}

impl RateSchedule {
    /// Read the schedule from a TOML file.
    ///
    /// Hours that do not resolve to a defined tier are only reported: they are billed at zero.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the tariff file `{}`", path.display()))?;
        let schedule: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse the tariff file `{}`", path.display()))?;
        schedule.validate()?;
        info!(n_tiers = schedule.tiers.len(), "loaded the tariff schedule");
        Ok(schedule)
    }

    pub fn validate(&self) -> Result {
        let mut seen = HashSet::new();
        for tier in &self.tiers {
            ensure!(seen.insert(&tier.id), "duplicate tariff tier `{}`", tier.id);
            ensure!(tier.rate.is_finite(), "tier `{}` has an invalid rate", tier.id);
        }
        ensure!(self.injection_rate.is_finite(), "invalid injection rate");
        for (kind, hour) in self.unresolved_hours() {
            warn!(%kind, hour, "hour does not resolve to a tariff tier, it will be billed at zero");
        }
        Ok(())
    }

    #[must_use]
    pub const fn hours(&self, kind: DayKind) -> &HourlySchedule {
        match kind {
            DayKind::Weekday => &self.weekday,
            DayKind::Weekend => &self.weekend,
        }
    }

    #[must_use]
    pub fn tier(&self, id: &TierId) -> Option<&TariffTier> {
        self.tiers.iter().find(|tier| &tier.id == id)
    }

    /// Tier in force at the timestamp, or [`None`] when the schedule does not cover the hour.
    #[must_use]
    pub fn classify(&self, timestamp: NaiveDateTime) -> Option<&TierId> {
        self.hours(DayKind::of(timestamp.date())).get(timestamp.hour())
    }

    /// Consumption rate at the timestamp.
    ///
    /// Missing hours and unknown tiers are free rather than an error.
    #[must_use]
    pub fn rate_for(&self, timestamp: NaiveDateTime) -> KilowattHourRate {
        self.classify(timestamp)
            .and_then(|id| self.tier(id))
            .map_or(KilowattHourRate::ZERO, |tier| tier.rate)
    }

    /// Hours of the day which would be billed at zero.
    #[must_use]
    pub fn unresolved_hours(&self) -> Vec<(DayKind, u32)> {
        DayKind::ALL
            .into_iter()
            .flat_map(|kind| (0..24).map(move |hour| (kind, hour)))
            .filter(|(kind, hour)| {
                self.hours(*kind).get(*hour).and_then(|id| self.tier(id)).is_none()
            })
            .collect()
    }
}
