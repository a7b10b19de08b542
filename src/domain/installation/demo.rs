//! Demo - Single-Device Installation Layout
//!
//! Stand-in driver with exactly one inverter, one solar charger and one
//! battery at fixed device ids.

use crate::domain::command::InverterCommand;
use crate::domain::property::PropertyId;

use super::xcom::point;
use super::{InstallationLayout, Quantity};

/// Value of the driver field selecting this layout
pub const DRIVER_NAME: &str = "Demo";

pub const INVERTER_ID: &str = "inv";
pub const SOLAR_CHARGER_ID: &str = "sol";
pub const BATTERY_ID: &str = "bat";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoLayout;

impl DemoLayout {
    fn location(quantity: Quantity) -> (&'static str, u32) {
        match quantity {
            Quantity::InverterState => (INVERTER_ID, point::INVERTER_STATE),
            Quantity::PvPower => (SOLAR_CHARGER_ID, point::TRACK_POWER),
            Quantity::PvEnergyToday => (SOLAR_CHARGER_ID, point::TRACK_ENERGY_TODAY),
            Quantity::PvEnergyYesterday => (SOLAR_CHARGER_ID, point::TRACK_ENERGY_YESTERDAY),
            Quantity::GridPower => (INVERTER_ID, point::GRID_POWER),
            Quantity::GridEnergyToday => (INVERTER_ID, point::GRID_ENERGY_TODAY),
            Quantity::GridEnergyYesterday => (INVERTER_ID, point::GRID_ENERGY_YESTERDAY),
            Quantity::OutputPower => (INVERTER_ID, point::OUTPUT_POWER),
            Quantity::OutputEnergyToday => (INVERTER_ID, point::OUTPUT_ENERGY_TODAY),
            Quantity::OutputEnergyYesterday => (INVERTER_ID, point::OUTPUT_ENERGY_YESTERDAY),
            Quantity::BatteryPower => (BATTERY_ID, point::BATTERY_POWER),
            Quantity::BatteryVoltage => (BATTERY_ID, point::BATTERY_VOLTAGE),
            Quantity::BatteryCurrent => (BATTERY_ID, point::BATTERY_CURRENT),
            Quantity::BatteryCharge => (BATTERY_ID, point::BATTERY_CHARGE),
            Quantity::BatteryTemperature => (BATTERY_ID, point::BATTERY_TEMPERATURE),
            Quantity::BatteryChargeToday => (BATTERY_ID, point::BATTERY_CHARGE_TODAY),
            Quantity::BatteryDischargeToday => (BATTERY_ID, point::BATTERY_DISCHARGE_TODAY),
            Quantity::BatteryChargeYesterday => (BATTERY_ID, point::BATTERY_CHARGE_YESTERDAY),
            Quantity::BatteryDischargeYesterday => {
                (BATTERY_ID, point::BATTERY_DISCHARGE_YESTERDAY)
            }
        }
    }
}

impl InstallationLayout for DemoLayout {
    fn inverter_count(&self) -> usize {
        1
    }

    fn solar_charger_count(&self) -> usize {
        1
    }

    fn battery_count(&self) -> usize {
        1
    }

    fn property_ids(&self, access: &str, quantity: Quantity) -> Vec<PropertyId> {
        let (device, point) = Self::location(quantity);
        vec![PropertyId::compose(access, device, point)]
    }

    fn command_id(&self, access: &str, command: InverterCommand) -> Option<PropertyId> {
        let point = match command {
            InverterCommand::TurnOn => point::INVERTER_ON,
            InverterCommand::TurnOff => point::INVERTER_OFF,
        };
        Some(PropertyId::compose(access, INVERTER_ID, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_id_per_quantity() {
        for quantity in Quantity::ALL {
            assert_eq!(DemoLayout.property_ids("demo", quantity).len(), 1);
        }
        assert_eq!(
            DemoLayout.property_ids("demo", Quantity::PvPower),
            vec![PropertyId::from("demo.sol.11004")]
        );
    }

    #[test]
    fn commands_target_inverter() {
        assert_eq!(
            DemoLayout.command_id("demo", InverterCommand::TurnOff),
            Some(PropertyId::from("demo.inv.1399"))
        );
    }
}
