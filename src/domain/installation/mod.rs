//! Installation - Typed View over a Driver-Described Device List
//!
//! An [`Installation`] turns the raw property identifiers of one device access
//! into domain answers (PV power, battery charge, energy of the day, ...).
//! It is built once per successful connection handshake and replaced on
//! reconnect.

mod demo;
mod quantity;
mod store;
pub mod xcom;

use snafu::Snafu;

use crate::domain::category::PropertyCategory;
use crate::domain::command::{InverterCommand, WriteCommand};
use crate::domain::description::DeviceDescriptor;
use crate::domain::property::PropertyId;
use crate::error::{HandshakeError, Result};
use crate::services::GatewayClient;

pub use demo::DemoLayout;
pub use quantity::Quantity;
pub use store::PropertyStore;
pub use xcom::{DeviceRole, Xcom485iLayout};

/// Accessor outcome while one or more required values have not arrived yet
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(display("{quantity} not available yet"))]
pub struct ValueNotAvailable {
    pub quantity: Quantity,
    /// Required ids without a stored value; empty if the installation has no
    /// device providing the quantity at all
    pub missing: Vec<PropertyId>,
}

/// Result of a typed accessor
pub type Reading<T> = std::result::Result<T, ValueNotAvailable>;

/// Maps quantities and commands of one driver to concrete property ids
pub trait InstallationLayout {
    fn inverter_count(&self) -> usize;
    fn solar_charger_count(&self) -> usize;
    fn battery_count(&self) -> usize;

    /// Ids whose values make up `quantity`; empty if no device provides it
    fn property_ids(&self, device_access_id: &str, quantity: Quantity) -> Vec<PropertyId>;

    /// Command point for `command`, if the installation can execute it
    fn command_id(&self, device_access_id: &str, command: InverterCommand) -> Option<PropertyId>;
}

/// Supported drivers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Driver {
    Xcom485i(Xcom485iLayout),
    Demo(DemoLayout),
}

impl Driver {
    /// Select the driver named in a system description
    pub fn from_description(
        driver: &str,
        devices: &[DeviceDescriptor],
    ) -> std::result::Result<Self, HandshakeError> {
        match driver {
            xcom::DRIVER_NAME => Ok(Driver::Xcom485i(Xcom485iLayout::new(devices))),
            demo::DRIVER_NAME => Ok(Driver::Demo(DemoLayout)),
            other => Err(HandshakeError::UnsupportedDriver {
                driver: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Driver::Xcom485i(_) => xcom::DRIVER_NAME,
            Driver::Demo(_) => demo::DRIVER_NAME,
        }
    }

    fn layout(&self) -> &dyn InstallationLayout {
        match self {
            Driver::Xcom485i(layout) => layout,
            Driver::Demo(layout) => layout,
        }
    }
}

/// Live installation of one connected session
#[derive(Debug, Clone)]
pub struct Installation {
    device_access_id: String,
    driver: Driver,
    inverter_count: usize,
    solar_charger_count: usize,
    battery_count: usize,
    values: PropertyStore,
}

impl Installation {
    pub fn new(device_access_id: impl Into<String>, driver: Driver) -> Self {
        let layout = driver.layout();
        let (inverter_count, solar_charger_count, battery_count) = (
            layout.inverter_count(),
            layout.solar_charger_count(),
            layout.battery_count(),
        );
        Self {
            device_access_id: device_access_id.into(),
            driver,
            inverter_count,
            solar_charger_count,
            battery_count,
            values: PropertyStore::new(),
        }
    }

    /// Multi-device installation from a discovered device list
    pub fn xcom485i(device_access_id: impl Into<String>, devices: &[DeviceDescriptor]) -> Self {
        Self::new(device_access_id, Driver::Xcom485i(Xcom485iLayout::new(devices)))
    }

    /// Single-device demo installation
    pub fn demo(device_access_id: impl Into<String>) -> Self {
        Self::new(device_access_id, Driver::Demo(DemoLayout))
    }

    pub fn device_access_id(&self) -> &str {
        &self.device_access_id
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn inverter_count(&self) -> usize {
        self.inverter_count
    }

    pub fn solar_charger_count(&self) -> usize {
        self.solar_charger_count
    }

    pub fn battery_count(&self) -> usize {
        self.battery_count
    }

    /// Property ids covering every category in `categories`
    pub fn get_property_ids(&self, categories: PropertyCategory) -> Vec<PropertyId> {
        Quantity::in_categories(categories)
            .flat_map(|quantity| self.quantity_ids(quantity))
            .collect()
    }

    /// Property ids read by the accessor of `quantity`
    pub fn quantity_ids(&self, quantity: Quantity) -> Vec<PropertyId> {
        self.driver
            .layout()
            .property_ids(&self.device_access_id, quantity)
    }

    /// Value sink for read results and subscription updates. Ids outside the
    /// installation are stored too and simply never read.
    pub fn set_property_value(&mut self, property_id: PropertyId, value: f64) {
        self.values.set(property_id, value);
    }

    pub fn values(&self) -> &PropertyStore {
        &self.values
    }

    /// Sum of the stored values of every id making up `quantity`
    pub fn read(&self, quantity: Quantity) -> Reading<f64> {
        let ids = self.quantity_ids(quantity);
        if ids.is_empty() {
            return Err(ValueNotAvailable {
                quantity,
                missing: Vec::new(),
            });
        }

        let mut total = 0.0;
        let mut missing = Vec::new();
        for id in ids {
            match self.values.get(&id) {
                Some(value) => total += value,
                None => missing.push(id),
            }
        }

        if missing.is_empty() {
            Ok(total)
        } else {
            Err(ValueNotAvailable { quantity, missing })
        }
    }

    pub fn inverter_get_state(&self) -> Reading<bool> {
        self.read(Quantity::InverterState).map(|state| state == 1.0)
    }

    pub fn pv_get_power(&self) -> Reading<f64> {
        self.read(Quantity::PvPower)
    }

    pub fn pv_get_energy_today(&self) -> Reading<f64> {
        self.read(Quantity::PvEnergyToday)
    }

    pub fn pv_get_energy_yesterday(&self) -> Reading<f64> {
        self.read(Quantity::PvEnergyYesterday)
    }

    pub fn grid_get_power(&self) -> Reading<f64> {
        self.read(Quantity::GridPower)
    }

    pub fn grid_get_energy_today(&self) -> Reading<f64> {
        self.read(Quantity::GridEnergyToday)
    }

    pub fn grid_get_energy_yesterday(&self) -> Reading<f64> {
        self.read(Quantity::GridEnergyYesterday)
    }

    pub fn output_get_power(&self) -> Reading<f64> {
        self.read(Quantity::OutputPower)
    }

    pub fn output_get_energy_today(&self) -> Reading<f64> {
        self.read(Quantity::OutputEnergyToday)
    }

    pub fn output_get_energy_yesterday(&self) -> Reading<f64> {
        self.read(Quantity::OutputEnergyYesterday)
    }

    pub fn battery_get_power(&self) -> Reading<f64> {
        self.read(Quantity::BatteryPower)
    }

    pub fn battery_get_voltage(&self) -> Reading<f64> {
        self.read(Quantity::BatteryVoltage)
    }

    pub fn battery_get_current(&self) -> Reading<f64> {
        self.read(Quantity::BatteryCurrent)
    }

    pub fn battery_get_charge(&self) -> Reading<f64> {
        self.read(Quantity::BatteryCharge)
    }

    pub fn battery_get_temperature(&self) -> Reading<f64> {
        self.read(Quantity::BatteryTemperature)
    }

    pub fn battery_get_charge_today(&self) -> Reading<f64> {
        self.read(Quantity::BatteryChargeToday)
    }

    pub fn battery_get_charge_yesterday(&self) -> Reading<f64> {
        self.read(Quantity::BatteryChargeYesterday)
    }

    pub fn battery_get_discharge_today(&self) -> Reading<f64> {
        self.read(Quantity::BatteryDischargeToday)
    }

    pub fn battery_get_discharge_yesterday(&self) -> Reading<f64> {
        self.read(Quantity::BatteryDischargeYesterday)
    }

    /// Send the inverter-on command. The local state only changes once the
    /// state property is read back through the subscription.
    pub fn inverter_turn_on(&self, client: &dyn GatewayClient) -> Result<()> {
        self.send_inverter_command(client, InverterCommand::TurnOn)
    }

    pub fn inverter_turn_off(&self, client: &dyn GatewayClient) -> Result<()> {
        self.send_inverter_command(client, InverterCommand::TurnOff)
    }

    fn send_inverter_command(
        &self,
        client: &dyn GatewayClient,
        command: InverterCommand,
    ) -> Result<()> {
        let Some(id) = self
            .driver
            .layout()
            .command_id(&self.device_access_id, command)
        else {
            return Err(crate::error::Error::Invalid {
                message: format!(
                    "Installation {} has no inverter to receive {command:?}",
                    self.device_access_id
                ),
            });
        };
        tracing::info!("Inverter {:?} via {}", command, id);
        client.write_property(WriteCommand::trigger(id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::config::GatewayConfig;
    use crate::services::{ClientRequest, SimulatedGateway};

    fn devices(ids: &[&str]) -> Vec<DeviceDescriptor> {
        ids.iter().map(|id| DeviceDescriptor::new(*id)).collect()
    }

    fn id_set(ids: Vec<PropertyId>) -> BTreeSet<PropertyId> {
        ids.into_iter().collect()
    }

    fn full_installation() -> Installation {
        Installation::xcom485i("xcom", &devices(&["xts", "xt1", "xt2", "vt1", "vs1", "bat"]))
    }

    #[test]
    fn counts_for_single_devices() {
        let installation = Installation::xcom485i("xcom", &devices(&["xt1", "vt1", "bat"]));
        assert_eq!(installation.inverter_count(), 1);
        assert_eq!(installation.solar_charger_count(), 1);
        assert_eq!(installation.battery_count(), 1);

        let ids = installation.get_property_ids(PropertyCategory::BATTERY_CHARGE);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].point_code(), Some(xcom::point::BATTERY_CHARGE));
        assert_eq!(ids[0].as_str(), "xcom.bat.7002");
    }

    #[test]
    fn union_of_categories_is_union_of_ids() {
        let installation = full_installation();
        for a in PropertyCategory::ALL.iter() {
            for b in PropertyCategory::ALL.iter() {
                let combined = id_set(installation.get_property_ids(a | b));
                let mut separate = id_set(installation.get_property_ids(a));
                separate.extend(installation.get_property_ids(b));
                assert_eq!(combined, separate, "{a:?} | {b:?}");
            }
        }
    }

    #[test]
    fn property_ids_are_deterministic() {
        let installation = full_installation();
        let categories = PropertyCategory::PV_POWER | PropertyCategory::GRID_ENERGY_STATS;
        assert_eq!(
            installation.get_property_ids(categories),
            installation.get_property_ids(categories)
        );
        assert!(installation
            .get_property_ids(PropertyCategory::NONE)
            .is_empty());
    }

    #[test]
    fn pv_power_sums_both_charger_families() {
        let mut installation = Installation::xcom485i("xcom", &devices(&["vt1", "vs1"]));
        installation.set_property_value("xcom.vt1.11004".into(), 100.0);
        installation.set_property_value("xcom.vs1.15010".into(), 150.0);
        assert_eq!(installation.pv_get_power(), Ok(250.0));
    }

    #[test]
    fn sum_ignores_unrelated_points_sharing_a_suffix() {
        let mut installation = Installation::xcom485i("xcom", &devices(&["xt1"]));
        installation.set_property_value("xcom.xt1.3137".into(), 400.0);
        installation.set_property_value("xcom.xt1.13137".into(), 9999.0);
        installation.set_property_value("other.xt1.3137".into(), 9999.0);
        assert_eq!(installation.grid_get_power(), Ok(400.0));
    }

    #[test]
    fn partial_values_are_not_available() {
        let mut installation = Installation::xcom485i("xcom", &devices(&["xt1", "xt2"]));
        installation.set_property_value("xcom.xt1.3136".into(), 1.5);

        let err = installation.output_get_power().expect_err("xt2 missing");
        assert_eq!(err.quantity, Quantity::OutputPower);
        assert_eq!(err.missing, vec![PropertyId::from("xcom.xt2.3136")]);

        installation.set_property_value("xcom.xt2.3136".into(), 2.0);
        assert_eq!(installation.output_get_power(), Ok(3.5));
    }

    #[test]
    fn without_battery_no_battery_ids_or_values() {
        let mut installation = Installation::xcom485i("xcom", &devices(&["xt1", "vt1"]));
        assert_eq!(installation.battery_count(), 0);

        let battery_categories = PropertyCategory::BATTERY_POWER
            | PropertyCategory::BATTERY_VOLTAGE
            | PropertyCategory::BATTERY_CURRENT
            | PropertyCategory::BATTERY_CHARGE
            | PropertyCategory::BATTERY_TEMPERATURE
            | PropertyCategory::BATTERY_ENERGY_STATS;
        assert!(installation.get_property_ids(battery_categories).is_empty());

        installation.set_property_value("xcom.bat.7002".into(), 80.0);
        assert!(installation.battery_get_power().is_err());
        assert!(installation.battery_get_voltage().is_err());
        assert!(installation.battery_get_current().is_err());
        assert!(installation.battery_get_charge().is_err());
        assert!(installation.battery_get_temperature().is_err());
        assert!(installation.battery_get_charge_today().is_err());
        assert!(installation.battery_get_charge_yesterday().is_err());
        assert!(installation.battery_get_discharge_today().is_err());
        assert!(installation.battery_get_discharge_yesterday().is_err());
    }

    #[test]
    fn empty_device_list() {
        let installation = Installation::xcom485i("xcom", &[]);
        assert_eq!(installation.inverter_count(), 0);
        assert_eq!(installation.solar_charger_count(), 0);
        assert_eq!(installation.battery_count(), 0);
        assert!(installation
            .get_property_ids(PropertyCategory::ALL)
            .is_empty());
        assert!(installation.inverter_get_state().is_err());
        assert!(installation.pv_get_power().is_err());
    }

    #[test]
    fn battery_values_are_raw() {
        let mut installation = full_installation();
        installation.set_property_value("xcom.bat.7007".into(), 3.25);
        installation.set_property_value("xcom.bat.7008".into(), 1.5);
        installation.set_property_value("xcom.bat.7009".into(), 4.0);
        installation.set_property_value("xcom.bat.7010".into(), 2.0);
        assert_eq!(installation.battery_get_charge_today(), Ok(3.25));
        assert_eq!(installation.battery_get_discharge_today(), Ok(1.5));
        assert_eq!(installation.battery_get_charge_yesterday(), Ok(4.0));
        assert_eq!(installation.battery_get_discharge_yesterday(), Ok(2.0));
    }

    #[test]
    fn setting_the_same_value_twice_is_idempotent() {
        let mut installation = full_installation();
        installation.set_property_value("xcom.bat.7002".into(), 71.0);
        let first = installation.battery_get_charge();
        installation.set_property_value("xcom.bat.7002".into(), 71.0);
        assert_eq!(installation.battery_get_charge(), first);
        assert_eq!(installation.values().len(), 1);
    }

    #[test]
    fn inverter_state_is_on_only_for_one() {
        let mut installation = Installation::demo("demo");
        installation.set_property_value("demo.inv.3049".into(), 1.0);
        assert_eq!(installation.inverter_get_state(), Ok(true));
        installation.set_property_value("demo.inv.3049".into(), 0.0);
        assert_eq!(installation.inverter_get_state(), Ok(false));
    }

    #[test]
    fn demo_counts_and_lookups() {
        let mut installation = Installation::demo("demo");
        assert_eq!(
            (
                installation.inverter_count(),
                installation.solar_charger_count(),
                installation.battery_count()
            ),
            (1, 1, 1)
        );
        installation.set_property_value("demo.inv.3081".into(), 12.5);
        assert_eq!(installation.grid_get_energy_today(), Ok(12.5));
        assert_eq!(
            installation.get_property_ids(PropertyCategory::OUTPUT_ENERGY_STATS),
            vec![
                PropertyId::from("demo.inv.3083"),
                PropertyId::from("demo.inv.3082")
            ]
        );
    }

    #[test]
    fn driver_factory() {
        assert_eq!(
            Driver::from_description("Demo", &[]).expect("demo").name(),
            "Demo"
        );
        assert_eq!(
            Driver::from_description("Xcom485i", &devices(&["xt1"]))
                .expect("xcom")
                .name(),
            "Xcom485i"
        );
        assert!(matches!(
            Driver::from_description("Xcom232i", &[]),
            Err(HandshakeError::UnsupportedDriver { driver }) if driver == "Xcom232i"
        ));
    }

    #[test]
    fn turn_on_and_off_write_command_points() {
        let (gateway, _events) = SimulatedGateway::new();
        gateway
            .connect(&GatewayConfig::default())
            .expect("connect");
        let installation = full_installation();
        installation.inverter_turn_on(&gateway).expect("turn on");
        installation.inverter_turn_off(&gateway).expect("turn off");

        let written: Vec<_> = gateway
            .requests()
            .into_iter()
            .filter_map(|request| match request {
                ClientRequest::Write(command) => Some(command.property_id),
                _ => None,
            })
            .collect();
        assert_eq!(
            written,
            vec![
                PropertyId::from("xcom.xts.1415"),
                PropertyId::from("xcom.xts.1399")
            ]
        );
        assert!(installation.inverter_get_state().is_err());
    }

    #[test]
    fn turn_on_without_inverter_fails() {
        let (gateway, _events) = SimulatedGateway::new();
        let installation = Installation::xcom485i("xcom", &devices(&["bat"]));
        assert!(installation.inverter_turn_on(&gateway).is_err());
        assert!(gateway.requests().is_empty());
    }
}
