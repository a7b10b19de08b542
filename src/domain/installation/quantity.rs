//! Quantity - One Readable Measurement of an Installation
//!
//! Every typed accessor of [`Installation`](super::Installation) reads exactly
//! one quantity, and every quantity belongs to exactly one category.

use std::fmt;

use crate::domain::category::PropertyCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    InverterState,
    PvPower,
    PvEnergyToday,
    PvEnergyYesterday,
    GridPower,
    GridEnergyToday,
    GridEnergyYesterday,
    OutputPower,
    OutputEnergyToday,
    OutputEnergyYesterday,
    BatteryPower,
    BatteryVoltage,
    BatteryCurrent,
    BatteryCharge,
    BatteryTemperature,
    BatteryChargeToday,
    BatteryDischargeToday,
    BatteryChargeYesterday,
    BatteryDischargeYesterday,
}

impl Quantity {
    /// All quantities, in the order their ids are generated
    pub const ALL: [Quantity; 19] = [
        Quantity::InverterState,
        Quantity::PvPower,
        Quantity::PvEnergyToday,
        Quantity::PvEnergyYesterday,
        Quantity::GridPower,
        Quantity::GridEnergyToday,
        Quantity::GridEnergyYesterday,
        Quantity::OutputPower,
        Quantity::OutputEnergyToday,
        Quantity::OutputEnergyYesterday,
        Quantity::BatteryPower,
        Quantity::BatteryVoltage,
        Quantity::BatteryCurrent,
        Quantity::BatteryCharge,
        Quantity::BatteryTemperature,
        Quantity::BatteryChargeToday,
        Quantity::BatteryDischargeToday,
        Quantity::BatteryChargeYesterday,
        Quantity::BatteryDischargeYesterday,
    ];

    pub fn category(self) -> PropertyCategory {
        match self {
            Quantity::InverterState => PropertyCategory::INVERTER_STATE,
            Quantity::PvPower => PropertyCategory::PV_POWER,
            Quantity::PvEnergyToday | Quantity::PvEnergyYesterday => {
                PropertyCategory::PV_ENERGY_STATS
            }
            Quantity::GridPower => PropertyCategory::GRID_POWER,
            Quantity::GridEnergyToday | Quantity::GridEnergyYesterday => {
                PropertyCategory::GRID_ENERGY_STATS
            }
            Quantity::OutputPower => PropertyCategory::OUTPUT_POWER,
            Quantity::OutputEnergyToday | Quantity::OutputEnergyYesterday => {
                PropertyCategory::OUTPUT_ENERGY_STATS
            }
            Quantity::BatteryPower => PropertyCategory::BATTERY_POWER,
            Quantity::BatteryVoltage => PropertyCategory::BATTERY_VOLTAGE,
            Quantity::BatteryCurrent => PropertyCategory::BATTERY_CURRENT,
            Quantity::BatteryCharge => PropertyCategory::BATTERY_CHARGE,
            Quantity::BatteryTemperature => PropertyCategory::BATTERY_TEMPERATURE,
            Quantity::BatteryChargeToday
            | Quantity::BatteryDischargeToday
            | Quantity::BatteryChargeYesterday
            | Quantity::BatteryDischargeYesterday => PropertyCategory::BATTERY_ENERGY_STATS,
        }
    }

    /// Quantities whose category is part of `categories`
    pub fn in_categories(categories: PropertyCategory) -> impl Iterator<Item = Quantity> {
        Self::ALL
            .into_iter()
            .filter(move |quantity| categories.intersects(quantity.category()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Quantity::InverterState => "inverter state",
            Quantity::PvPower => "PV power",
            Quantity::PvEnergyToday => "PV energy today",
            Quantity::PvEnergyYesterday => "PV energy yesterday",
            Quantity::GridPower => "grid power",
            Quantity::GridEnergyToday => "grid energy today",
            Quantity::GridEnergyYesterday => "grid energy yesterday",
            Quantity::OutputPower => "output power",
            Quantity::OutputEnergyToday => "output energy today",
            Quantity::OutputEnergyYesterday => "output energy yesterday",
            Quantity::BatteryPower => "battery power",
            Quantity::BatteryVoltage => "battery voltage",
            Quantity::BatteryCurrent => "battery current",
            Quantity::BatteryCharge => "battery charge",
            Quantity::BatteryTemperature => "battery temperature",
            Quantity::BatteryChargeToday => "battery charge today",
            Quantity::BatteryDischargeToday => "battery discharge today",
            Quantity::BatteryChargeYesterday => "battery charge yesterday",
            Quantity::BatteryDischargeYesterday => "battery discharge yesterday",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_quantity() {
        for category in PropertyCategory::ALL.iter() {
            assert!(Quantity::in_categories(category).count() >= 1, "{category:?}");
        }
    }

    #[test]
    fn energy_stats_group_today_and_yesterday() {
        let grid: Vec<_> = Quantity::in_categories(PropertyCategory::GRID_ENERGY_STATS).collect();
        assert_eq!(
            grid,
            vec![Quantity::GridEnergyToday, Quantity::GridEnergyYesterday]
        );
        assert_eq!(
            Quantity::in_categories(PropertyCategory::BATTERY_ENERGY_STATS).count(),
            4
        );
    }
}
