//! Conversion of meter exports into [`EnergyInterval`][crate::core::EnergyInterval]s.

pub mod fluvius;
