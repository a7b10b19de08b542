//! SimulatedGateway - In-Process Gateway Client
//!
//! Answers the connection handshake with a fixed description document, serves
//! reads from a value table, keeps track of subscriptions and pushes updates
//! for subscribed properties on every [`tick`](SimulatedGateway::tick).
//! The most recent requests are recorded in order, so the gateway doubles as
//! the recording client of the lifecycle tests.

use ahash::{AHashMap, AHashSet};
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::constants::REQUEST_LOG_CAPACITY;
use crate::domain::command::WriteCommand;
use crate::domain::config::GatewayConfig;
use crate::domain::description::{
    DescriptionFlags, DeviceAccessDescription, DeviceDescriptor, SystemDescription,
};
use crate::domain::installation::xcom::point;
use crate::domain::installation::{Installation, Quantity};
use crate::domain::message::DeviceMessage;
use crate::domain::property::{PropertyId, PropertyResult};
use crate::error::{Error, Result};
use crate::helpers::BoundedDeque;

use super::handshake::build_installation;
use super::{AccessLevel, ConnectionState, GatewayClient, GatewayEvent, Status};

const GATEWAY_VERSION: &str = "simulated-1.0";

/// A request as received by the simulated gateway
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    Connect {
        host: String,
        port: u16,
        user: Option<String>,
    },
    Disconnect,
    Enumerate,
    Describe(DescriptionFlags),
    Read(Vec<PropertyId>),
    Subscribe(Vec<PropertyId>),
    Unsubscribe(Vec<PropertyId>),
    Write(WriteCommand),
    ReadMessages(usize),
}

struct SimulatedState {
    connection: ConnectionState,
    description: String,
    device_count: usize,
    enumeration_status: Status,
    description_status: Status,
    values: AHashMap<PropertyId, f64>,
    subscriptions: AHashSet<PropertyId>,
    messages: Vec<DeviceMessage>,
    requests: BoundedDeque<ClientRequest>,
    ticks: u64,
}

pub struct SimulatedGateway {
    state: Mutex<SimulatedState>,
    events: Sender<GatewayEvent>,
}

impl SimulatedGateway {
    /// Gateway describing a single `Demo` device access with id `demo`
    pub fn new() -> (Self, Receiver<GatewayEvent>) {
        Self::with_description(&Self::demo_description())
    }

    /// Gateway answering describe requests with `description`. Values are
    /// seeded for every property of the installation it describes.
    pub fn with_description(description: &SystemDescription) -> (Self, Receiver<GatewayEvent>) {
        let (json, device_count, values) = describe_parts(description);
        Self::from_parts(json, device_count, values)
    }

    /// Gateway answering describe requests with the raw document `json`
    pub fn with_raw_description(json: impl Into<String>) -> (Self, Receiver<GatewayEvent>) {
        Self::from_parts(json.into(), 0, AHashMap::new())
    }

    fn from_parts(
        description: String,
        device_count: usize,
        values: AHashMap<PropertyId, f64>,
    ) -> (Self, Receiver<GatewayEvent>) {
        let (events, receiver) = crossbeam_channel::unbounded();
        let gateway = Self {
            state: Mutex::new(SimulatedState {
                connection: ConnectionState::Disconnected,
                description,
                device_count,
                enumeration_status: Status::Success,
                description_status: Status::Success,
                values,
                subscriptions: AHashSet::new(),
                messages: Vec::new(),
                requests: BoundedDeque::new(REQUEST_LOG_CAPACITY),
                ticks: 0,
            }),
            events,
        };
        (gateway, receiver)
    }

    pub fn demo_description() -> SystemDescription {
        SystemDescription {
            instances: Some(vec![DeviceAccessDescription {
                id: Some("demo".to_string()),
                driver: Some("Demo".to_string()),
                devices: Some(vec![
                    DeviceDescriptor::new("inv"),
                    DeviceDescriptor::new("sol"),
                    DeviceDescriptor::new("bat"),
                ]),
            }]),
        }
    }

    /// Answer later describe requests with `description`, as after a change
    /// of the installation. Values of known ids are kept.
    pub fn set_description(&self, description: &SystemDescription) {
        let (json, device_count, values) = describe_parts(description);
        let mut state = self.state.lock();
        state.description = json;
        state.device_count = device_count;
        for (id, value) in values {
            state.values.entry(id).or_insert(value);
        }
    }

    pub fn set_enumeration_status(&self, status: Status) {
        self.state.lock().enumeration_status = status;
    }

    pub fn set_description_status(&self, status: Status) {
        self.state.lock().description_status = status;
    }

    /// Change a value without notifying subscribers
    pub fn set_value(&self, id: PropertyId, value: f64) {
        self.state.lock().values.insert(id, value);
    }

    pub fn value(&self, id: &PropertyId) -> Option<f64> {
        self.state.lock().values.get(id).copied()
    }

    /// Change a value and notify, whether subscribed or not
    pub fn push_update(&self, id: PropertyId, value: f64) -> Result<()> {
        self.state.lock().values.insert(id.clone(), value);
        self.emit(GatewayEvent::PropertyUpdated { id, value })
    }

    /// Store a device message and deliver it live
    pub fn push_message(&self, message: DeviceMessage) -> Result<()> {
        self.state.lock().messages.push(message.clone());
        self.emit(GatewayEvent::DeviceMessage(message))
    }

    /// Recently received requests, oldest first
    pub fn requests(&self) -> Vec<ClientRequest> {
        self.state.lock().requests.iter().cloned().collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().requests.clear();
    }

    /// Currently subscribed ids, sorted
    pub fn subscriptions(&self) -> Vec<PropertyId> {
        let mut ids: Vec<_> = self.state.lock().subscriptions.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Let measured values drift and push an update for every subscribed id
    pub fn tick(&self) -> Result<()> {
        let updates = {
            let mut state = self.state.lock();
            if state.connection != ConnectionState::Connected {
                return Ok(());
            }
            state.ticks += 1;
            let factor = 1.0 + 0.02 * ((state.ticks % 5) as f64 - 2.0);

            let mut ids: Vec<_> = state.subscriptions.iter().cloned().collect();
            ids.sort();
            let mut updates = Vec::with_capacity(ids.len());
            for id in ids {
                let Some(value) = state.values.get(&id).copied() else {
                    continue;
                };
                let value = if id.point_code().is_some_and(is_fluctuating) {
                    let drifted = (value * factor * 1000.0).round() / 1000.0;
                    state.values.insert(id.clone(), drifted);
                    drifted
                } else {
                    value
                };
                updates.push(GatewayEvent::PropertyUpdated { id, value });
            }
            updates
        };

        for update in updates {
            self.emit(update)?;
        }
        Ok(())
    }

    fn record(&self, request: ClientRequest) {
        self.state.lock().requests.push(request);
    }

    fn emit(&self, event: GatewayEvent) -> Result<()> {
        self.events.send(event).map_err(|e| Error::ChannelSend {
            message: e.to_string(),
        })
    }

    fn ensure_connected(&self) -> Result<()> {
        match self.state.lock().connection {
            ConnectionState::Connected => Ok(()),
            _ => Err(Error::Connection {
                message: "Not connected".to_string(),
            }),
        }
    }

    fn batch(
        &self,
        ids: &[PropertyId],
        mut apply: impl FnMut(&mut SimulatedState, &PropertyId) -> PropertyResult,
    ) -> Vec<PropertyResult> {
        let mut state = self.state.lock();
        ids.iter().map(|id| apply(&mut state, id)).collect()
    }
}

impl GatewayClient for SimulatedGateway {
    fn state(&self) -> ConnectionState {
        self.state.lock().connection
    }

    fn connect(&self, config: &GatewayConfig) -> Result<()> {
        self.record(ClientRequest::Connect {
            host: config.host.clone(),
            port: config.port,
            user: config.user.clone(),
        });
        {
            let mut state = self.state.lock();
            if state.connection == ConnectionState::Connected {
                return Err(Error::Connection {
                    message: format!("Already connected to {}", config.endpoint()),
                });
            }
            state.connection = ConnectionState::Connected;
        }
        let access_level = match config.user {
            Some(_) => AccessLevel::Installer,
            None => AccessLevel::Basic,
        };
        self.emit(GatewayEvent::Connected {
            access_level,
            gateway_version: GATEWAY_VERSION.to_string(),
        })
    }

    fn disconnect(&self) -> Result<()> {
        self.record(ClientRequest::Disconnect);
        {
            let mut state = self.state.lock();
            state.connection = ConnectionState::Disconnected;
            state.subscriptions.clear();
        }
        self.emit(GatewayEvent::Disconnected)
    }

    fn enumerate(&self) -> Result<()> {
        self.record(ClientRequest::Enumerate);
        self.ensure_connected()?;
        let (status, device_count) = {
            let state = self.state.lock();
            (state.enumeration_status, state.device_count)
        };
        self.emit(GatewayEvent::Enumerated {
            status,
            device_count,
        })
    }

    fn describe(&self, flags: DescriptionFlags) -> Result<()> {
        self.record(ClientRequest::Describe(flags));
        self.ensure_connected()?;
        let (status, description) = {
            let state = self.state.lock();
            (state.description_status, state.description.clone())
        };
        self.emit(GatewayEvent::Described {
            status,
            id: None,
            description,
        })
    }

    fn read_properties(&self, ids: &[PropertyId]) -> Result<()> {
        self.record(ClientRequest::Read(ids.to_vec()));
        self.ensure_connected()?;
        let results = self.batch(ids, |state, id| match state.values.get(id) {
            Some(value) => PropertyResult::success(id.clone(), Some(*value)),
            None => PropertyResult::failure(id.clone(), Status::NoProperty),
        });
        self.emit(GatewayEvent::PropertiesRead { results })
    }

    fn subscribe_to_properties(&self, ids: &[PropertyId]) -> Result<()> {
        self.record(ClientRequest::Subscribe(ids.to_vec()));
        self.ensure_connected()?;
        let results = self.batch(ids, |state, id| {
            if state.values.contains_key(id) {
                state.subscriptions.insert(id.clone());
                PropertyResult::success(id.clone(), None)
            } else {
                PropertyResult::failure(id.clone(), Status::NoProperty)
            }
        });
        self.emit(GatewayEvent::PropertiesSubscribed { results })
    }

    fn unsubscribe_from_properties(&self, ids: &[PropertyId]) -> Result<()> {
        self.record(ClientRequest::Unsubscribe(ids.to_vec()));
        self.ensure_connected()?;
        let results = self.batch(ids, |state, id| {
            if state.subscriptions.remove(id) {
                PropertyResult::success(id.clone(), None)
            } else {
                PropertyResult::failure(id.clone(), Status::NoProperty)
            }
        });
        self.emit(GatewayEvent::PropertiesUnsubscribed { results })
    }

    fn write_property(&self, command: WriteCommand) -> Result<()> {
        self.record(ClientRequest::Write(command.clone()));
        self.ensure_connected()?;
        tracing::debug!(
            "Write {} ({}) = {:?}",
            command.property_id,
            command.request_id,
            command.value
        );

        let state_value = match command.property_id.point_code() {
            Some(point::INVERTER_ON) => 1.0,
            Some(point::INVERTER_OFF) => 0.0,
            _ => {
                if let Some(value) = command.value {
                    self.set_value(command.property_id, value);
                }
                return Ok(());
            }
        };
        let (Some(access), Some(device)) = (
            command.property_id.device_access_id(),
            command.property_id.device_id(),
        ) else {
            return Ok(());
        };
        let state_id = PropertyId::compose(access, device, point::INVERTER_STATE);

        let subscribed = {
            let mut state = self.state.lock();
            state.values.insert(state_id.clone(), state_value);
            state.subscriptions.contains(&state_id)
        };
        if subscribed {
            self.emit(GatewayEvent::PropertyUpdated {
                id: state_id,
                value: state_value,
            })?;
        }
        Ok(())
    }

    fn read_messages(&self, limit: usize) -> Result<()> {
        self.record(ClientRequest::ReadMessages(limit));
        self.ensure_connected()?;
        let messages: Vec<_> = {
            let state = self.state.lock();
            let skip = state.messages.len().saturating_sub(limit);
            state.messages[skip..].to_vec()
        };
        self.emit(GatewayEvent::MessagesRead {
            status: Status::Success,
            count: messages.len(),
            messages,
        })
    }
}

/// Description document, device count and seed values for `description`
fn describe_parts(description: &SystemDescription) -> (String, usize, AHashMap<PropertyId, f64>) {
    let device_count = description
        .instances
        .iter()
        .flatten()
        .flat_map(|access| access.devices.iter().flatten())
        .count();
    let values = match build_installation(description.clone()) {
        Ok(installation) => seed_values(&installation),
        Err(e) => {
            tracing::debug!("No values seeded: {}", e);
            AHashMap::new()
        }
    };
    let json = match serde_json::to_string(description) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Description not serializable, serving an empty one: {}", e);
            String::new()
        }
    };
    (json, device_count, values)
}

fn is_fluctuating(point_code: u32) -> bool {
    matches!(
        point_code,
        point::TRACK_POWER
            | point::STRING_POWER
            | point::GRID_POWER
            | point::OUTPUT_POWER
            | point::BATTERY_POWER
            | point::BATTERY_CURRENT
    )
}

fn initial_value(quantity: Quantity) -> f64 {
    match quantity {
        Quantity::InverterState => 1.0,
        Quantity::PvPower => 2.35,
        Quantity::PvEnergyToday => 11.4,
        Quantity::PvEnergyYesterday => 14.82,
        Quantity::GridPower => 0.42,
        Quantity::GridEnergyToday => 3.1,
        Quantity::GridEnergyYesterday => 2.64,
        Quantity::OutputPower => 1.87,
        Quantity::OutputEnergyToday => 9.75,
        Quantity::OutputEnergyYesterday => 12.3,
        Quantity::BatteryPower => 0.48,
        Quantity::BatteryVoltage => 52.4,
        Quantity::BatteryCurrent => 9.2,
        Quantity::BatteryCharge => 76.0,
        Quantity::BatteryTemperature => 24.5,
        Quantity::BatteryChargeToday => 4.2,
        Quantity::BatteryDischargeToday => 2.9,
        Quantity::BatteryChargeYesterday => 5.1,
        Quantity::BatteryDischargeYesterday => 4.4,
    }
}

fn seed_values(installation: &Installation) -> AHashMap<PropertyId, f64> {
    Quantity::ALL
        .into_iter()
        .flat_map(|quantity| {
            installation
                .quantity_ids(quantity)
                .into_iter()
                .map(move |id| (id, initial_value(quantity)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> (SimulatedGateway, Receiver<GatewayEvent>) {
        let (gateway, events) = SimulatedGateway::new();
        gateway
            .connect(&GatewayConfig::default())
            .expect("connect");
        assert!(matches!(events.try_recv(), Ok(GatewayEvent::Connected { .. })));
        (gateway, events)
    }

    #[test]
    fn requests_need_a_connection() {
        let (gateway, _events) = SimulatedGateway::new();
        assert!(gateway.enumerate().is_err());
        assert!(gateway.read_properties(&["demo.bat.7002".into()]).is_err());
        assert_eq!(gateway.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn reads_report_per_id_status() {
        let (gateway, events) = connected();
        gateway
            .read_properties(&["demo.bat.7002".into(), "demo.bat.9999".into()])
            .expect("read");
        let Ok(GatewayEvent::PropertiesRead { results }) = events.try_recv() else {
            panic!("expected read results");
        };
        assert_eq!(results[0].successful_value(), Some(76.0));
        assert_eq!(results[1].status, Status::NoProperty);
    }

    #[test]
    fn ticks_update_subscribed_ids_only() {
        let (gateway, events) = connected();
        gateway
            .subscribe_to_properties(&["demo.sol.11004".into()])
            .expect("subscribe");
        let _ = events.try_recv();

        gateway.tick().expect("tick");
        let updates: Vec<_> = events.try_iter().collect();
        assert_eq!(updates.len(), 1);
        assert!(matches!(
            &updates[0],
            GatewayEvent::PropertyUpdated { id, .. } if id.as_str() == "demo.sol.11004"
        ));

        gateway
            .unsubscribe_from_properties(&["demo.sol.11004".into()])
            .expect("unsubscribe");
        let _ = events.try_recv();
        gateway.tick().expect("tick");
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn inverter_commands_switch_the_state_point() {
        let (gateway, events) = connected();
        let state_id = PropertyId::from("demo.inv.3049");
        gateway
            .subscribe_to_properties(std::slice::from_ref(&state_id))
            .expect("subscribe");
        let _ = events.try_recv();

        gateway
            .write_property(WriteCommand::trigger("demo.inv.1399".into()))
            .expect("write");
        assert_eq!(gateway.value(&state_id), Some(0.0));
        assert!(matches!(
            events.try_recv(),
            Ok(GatewayEvent::PropertyUpdated { value, .. }) if value == 0.0
        ));
    }

    #[test]
    fn message_history_is_limited() {
        let (gateway, events) = connected();
        for n in 0..5 {
            gateway
                .push_message(DeviceMessage::new("demo", "inv", n, format!("message {n}")))
                .expect("push");
        }
        let _: Vec<_> = events.try_iter().collect();

        gateway.read_messages(2).expect("read messages");
        let Ok(GatewayEvent::MessagesRead { count, messages, .. }) = events.try_recv() else {
            panic!("expected messages");
        };
        assert_eq!(count, 2);
        assert_eq!(messages[0].message_id, 3);
        assert_eq!(messages[1].message_id, 4);
    }

    #[test]
    fn request_log_keeps_the_newest_requests() {
        let (gateway, _events) = connected();
        for _ in 0..REQUEST_LOG_CAPACITY {
            gateway.read_messages(1).expect("read messages");
        }
        gateway.enumerate().expect("enumerate");

        let requests = gateway.requests();
        assert_eq!(requests.len(), REQUEST_LOG_CAPACITY);
        assert_eq!(requests.last(), Some(&ClientRequest::Enumerate));
        assert!(!requests.iter().any(|r| matches!(r, ClientRequest::Connect { .. })));

        gateway.clear_requests();
        assert!(gateway.requests().is_empty());
    }

    #[test]
    fn disconnect_drops_subscriptions() {
        let (gateway, _events) = connected();
        gateway
            .subscribe_to_properties(&["demo.bat.7002".into()])
            .expect("subscribe");
        assert_eq!(gateway.subscriptions().len(), 1);
        gateway.disconnect().expect("disconnect");
        assert!(gateway.subscriptions().is_empty());
    }
}
