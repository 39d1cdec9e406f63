use std::fmt::{Debug, Formatter};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::quantity::energy::KilowattHours;

/// Half-open window of local wall-clock time, as printed by the meter export.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: NaiveDateTime,

    /// Exclusive.
    pub end: NaiveDateTime,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    /// Calendar day the interval is accounted to.
    #[must_use]
    pub fn date(self) -> NaiveDate {
        self.start.date()
    }
}

/// Metered grid flows over one interval, before any battery action.
#[derive(Copy, Clone, Debug, PartialEq)]
#[must_use]
pub struct EnergyInterval {
    pub interval: Interval,

    /// Energy drawn from the grid.
    pub consumption: KilowattHours,

    /// Energy fed into the grid.
    pub injection: KilowattHours,
}

impl EnergyInterval {
    pub const fn new(
        interval: Interval,
        consumption: KilowattHours,
        injection: KilowattHours,
    ) -> Self {
        Self { interval, consumption, injection }
    }

    /// Empty interval, to be filled in register by register.
    pub const fn empty(interval: Interval) -> Self {
        Self::new(interval, KilowattHours::ZERO, KilowattHours::ZERO)
    }
}
