//! Xcom485i - Multi-Device Installation Layout
//!
//! Devices behind an Xcom-485i access are classified by id prefix:
//! `xt*` inverters, `vt*` and `vs*` solar chargers, `bat` the battery.
//! The `xts`, `vts` and `vss` ids address a whole device group and are not
//! counted as devices.

use crate::domain::command::InverterCommand;
use crate::domain::description::DeviceDescriptor;
use crate::domain::property::PropertyId;

use super::{InstallationLayout, Quantity};

/// Value of the driver field selecting this layout
pub const DRIVER_NAME: &str = "Xcom485i";

/// Group id addressing all inverters at once
const INVERTER_GROUP_ID: &str = "xts";
const BATTERY_ID: &str = "bat";

/// Point codes
pub mod point {
    pub const INVERTER_STATE: u32 = 3049;
    pub const INVERTER_ON: u32 = 1415;
    pub const INVERTER_OFF: u32 = 1399;

    pub const TRACK_POWER: u32 = 11004;
    pub const TRACK_ENERGY_TODAY: u32 = 11007;
    pub const TRACK_ENERGY_YESTERDAY: u32 = 11011;

    pub const STRING_POWER: u32 = 15010;
    pub const STRING_ENERGY_TODAY: u32 = 15017;
    pub const STRING_ENERGY_YESTERDAY: u32 = 15027;

    pub const GRID_POWER: u32 = 3137;
    pub const GRID_ENERGY_TODAY: u32 = 3081;
    pub const GRID_ENERGY_YESTERDAY: u32 = 3080;
    pub const OUTPUT_POWER: u32 = 3136;
    pub const OUTPUT_ENERGY_TODAY: u32 = 3083;
    pub const OUTPUT_ENERGY_YESTERDAY: u32 = 3082;

    pub const BATTERY_VOLTAGE: u32 = 7000;
    pub const BATTERY_CURRENT: u32 = 7001;
    pub const BATTERY_CHARGE: u32 = 7002;
    pub const BATTERY_POWER: u32 = 7003;
    pub const BATTERY_CHARGE_TODAY: u32 = 7007;
    pub const BATTERY_DISCHARGE_TODAY: u32 = 7008;
    pub const BATTERY_CHARGE_YESTERDAY: u32 = 7009;
    pub const BATTERY_DISCHARGE_YESTERDAY: u32 = 7010;
    pub const BATTERY_TEMPERATURE: u32 = 7033;
}

/// Role of a device, derived from its id alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    Inverter,
    /// Solar charger, `vt*` family
    TrackCharger,
    /// Solar charger, `vs*` family
    StringCharger,
    Battery,
}

impl DeviceRole {
    pub fn classify(device_id: &str) -> Option<Self> {
        if device_id.starts_with("xt") && device_id != "xts" {
            Some(DeviceRole::Inverter)
        } else if device_id.starts_with("vt") && device_id != "vts" {
            Some(DeviceRole::TrackCharger)
        } else if device_id.starts_with("vs") && device_id != "vss" {
            Some(DeviceRole::StringCharger)
        } else if device_id == BATTERY_ID {
            Some(DeviceRole::Battery)
        } else {
            None
        }
    }
}

/// Device classification captured when the installation is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xcom485iLayout {
    inverters: Vec<String>,
    track_chargers: Vec<String>,
    string_chargers: Vec<String>,
    battery: Option<String>,
}

impl Xcom485iLayout {
    pub fn new(devices: &[DeviceDescriptor]) -> Self {
        let mut layout = Self::default();
        for device in devices {
            match DeviceRole::classify(&device.id) {
                Some(DeviceRole::Inverter) => layout.inverters.push(device.id.clone()),
                Some(DeviceRole::TrackCharger) => layout.track_chargers.push(device.id.clone()),
                Some(DeviceRole::StringCharger) => layout.string_chargers.push(device.id.clone()),
                Some(DeviceRole::Battery) => layout.battery = Some(device.id.clone()),
                None => tracing::debug!("Ignoring device {}", device.id),
            }
        }
        layout
    }

    fn per_device(access: &str, devices: &[String], point: u32) -> Vec<PropertyId> {
        devices
            .iter()
            .map(|device| PropertyId::compose(access, device, point))
            .collect()
    }

    fn solar(&self, access: &str, track_point: u32, string_point: u32) -> Vec<PropertyId> {
        let mut ids = Self::per_device(access, &self.track_chargers, track_point);
        ids.extend(Self::per_device(access, &self.string_chargers, string_point));
        ids
    }

    fn battery_point(&self, access: &str, point: u32) -> Vec<PropertyId> {
        self.battery
            .iter()
            .map(|battery| PropertyId::compose(access, battery, point))
            .collect()
    }
}

impl InstallationLayout for Xcom485iLayout {
    fn inverter_count(&self) -> usize {
        self.inverters.len()
    }

    fn solar_charger_count(&self) -> usize {
        self.track_chargers.len() + self.string_chargers.len()
    }

    fn battery_count(&self) -> usize {
        usize::from(self.battery.is_some())
    }

    fn property_ids(&self, access: &str, quantity: Quantity) -> Vec<PropertyId> {
        match quantity {
            Quantity::InverterState if self.inverters.is_empty() => Vec::new(),
            Quantity::InverterState => vec![PropertyId::compose(
                access,
                INVERTER_GROUP_ID,
                point::INVERTER_STATE,
            )],
            Quantity::PvPower => self.solar(access, point::TRACK_POWER, point::STRING_POWER),
            Quantity::PvEnergyToday => self.solar(
                access,
                point::TRACK_ENERGY_TODAY,
                point::STRING_ENERGY_TODAY,
            ),
            Quantity::PvEnergyYesterday => self.solar(
                access,
                point::TRACK_ENERGY_YESTERDAY,
                point::STRING_ENERGY_YESTERDAY,
            ),
            Quantity::GridPower => Self::per_device(access, &self.inverters, point::GRID_POWER),
            Quantity::GridEnergyToday => {
                Self::per_device(access, &self.inverters, point::GRID_ENERGY_TODAY)
            }
            Quantity::GridEnergyYesterday => {
                Self::per_device(access, &self.inverters, point::GRID_ENERGY_YESTERDAY)
            }
            Quantity::OutputPower => Self::per_device(access, &self.inverters, point::OUTPUT_POWER),
            Quantity::OutputEnergyToday => {
                Self::per_device(access, &self.inverters, point::OUTPUT_ENERGY_TODAY)
            }
            Quantity::OutputEnergyYesterday => {
                Self::per_device(access, &self.inverters, point::OUTPUT_ENERGY_YESTERDAY)
            }
            Quantity::BatteryPower => self.battery_point(access, point::BATTERY_POWER),
            Quantity::BatteryVoltage => self.battery_point(access, point::BATTERY_VOLTAGE),
            Quantity::BatteryCurrent => self.battery_point(access, point::BATTERY_CURRENT),
            Quantity::BatteryCharge => self.battery_point(access, point::BATTERY_CHARGE),
            Quantity::BatteryTemperature => self.battery_point(access, point::BATTERY_TEMPERATURE),
            Quantity::BatteryChargeToday => self.battery_point(access, point::BATTERY_CHARGE_TODAY),
            Quantity::BatteryDischargeToday => {
                self.battery_point(access, point::BATTERY_DISCHARGE_TODAY)
            }
            Quantity::BatteryChargeYesterday => {
                self.battery_point(access, point::BATTERY_CHARGE_YESTERDAY)
            }
            Quantity::BatteryDischargeYesterday => {
                self.battery_point(access, point::BATTERY_DISCHARGE_YESTERDAY)
            }
        }
    }

    fn command_id(&self, access: &str, command: InverterCommand) -> Option<PropertyId> {
        if self.inverters.is_empty() {
            return None;
        }
        let point = match command {
            InverterCommand::TurnOn => point::INVERTER_ON,
            InverterCommand::TurnOff => point::INVERTER_OFF,
        };
        Some(PropertyId::compose(access, INVERTER_GROUP_ID, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices(ids: &[&str]) -> Vec<DeviceDescriptor> {
        ids.iter().map(|id| DeviceDescriptor::new(*id)).collect()
    }

    #[test]
    fn classify_by_prefix() {
        assert_eq!(DeviceRole::classify("xt1"), Some(DeviceRole::Inverter));
        assert_eq!(DeviceRole::classify("xts"), None);
        assert_eq!(DeviceRole::classify("vt2"), Some(DeviceRole::TrackCharger));
        assert_eq!(DeviceRole::classify("vts"), None);
        assert_eq!(DeviceRole::classify("vs1"), Some(DeviceRole::StringCharger));
        assert_eq!(DeviceRole::classify("vss"), None);
        assert_eq!(DeviceRole::classify("bat"), Some(DeviceRole::Battery));
        assert_eq!(DeviceRole::classify("bat2"), None);
        assert_eq!(DeviceRole::classify("bsp"), None);
    }

    #[test]
    fn counts_from_device_list() {
        let layout = Xcom485iLayout::new(&devices(&[
            "xts", "xt1", "xt2", "vts", "vt1", "vss", "vs1", "vs2", "bat", "bsp",
        ]));
        assert_eq!(layout.inverter_count(), 2);
        assert_eq!(layout.solar_charger_count(), 3);
        assert_eq!(layout.battery_count(), 1);
    }

    #[test]
    fn solar_families_use_their_own_points() {
        let layout = Xcom485iLayout::new(&devices(&["vt1", "vs1"]));
        let ids = layout.property_ids("xcom", Quantity::PvEnergyYesterday);
        assert_eq!(
            ids,
            vec![
                PropertyId::from("xcom.vt1.11011"),
                PropertyId::from("xcom.vs1.15027")
            ]
        );
    }

    #[test]
    fn commands_target_inverter_group() {
        let layout = Xcom485iLayout::new(&devices(&["xt1"]));
        assert_eq!(
            layout.command_id("xcom", InverterCommand::TurnOn),
            Some(PropertyId::from("xcom.xts.1415"))
        );
        assert_eq!(
            layout.command_id("xcom", InverterCommand::TurnOff),
            Some(PropertyId::from("xcom.xts.1399"))
        );
        assert_eq!(
            Xcom485iLayout::default().command_id("xcom", InverterCommand::TurnOn),
            None
        );
    }
}
