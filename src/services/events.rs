//! Gateway Events
//!
//! Notifications emitted by the gateway client and consumed by the session.
//! Every request of the client is fire-and-forget; its completion arrives
//! later as one of these events, on the same channel as unsolicited property
//! updates and device messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::message::DeviceMessage;
use crate::domain::property::{PropertyId, PropertyResult};

/// Status reported by the gateway for a request or a single property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Success,
    InProgress,
    Error,
    NoProperty,
    NoDevice,
    NoDeviceAccess,
    Timeout,
    InvalidValue,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Success => "SUCCESS",
            Status::InProgress => "IN_PROGRESS",
            Status::Error => "ERROR",
            Status::NoProperty => "NO_PROPERTY",
            Status::NoDevice => "NO_DEVICE",
            Status::NoDeviceAccess => "NO_DEVICE_ACCESS",
            Status::Timeout => "TIMEOUT",
            Status::InvalidValue => "INVALID_VALUE",
        };
        f.write_str(label)
    }
}

/// Access level granted by the gateway on connect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessLevel {
    #[default]
    None,
    Basic,
    Installer,
    Expert,
    Qualified,
}

/// Connection state of the client
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Events emitted by the gateway client
#[derive(Clone, Debug)]
pub enum GatewayEvent {
    // ==================== Connection ====================
    /// Connection established and authorized
    Connected {
        access_level: AccessLevel,
        gateway_version: String,
    },

    /// Connection closed, by request or by the peer
    Disconnected,

    /// Transport or protocol error outside any request
    Error { reason: String },

    // ==================== Handshake ====================
    /// Device enumeration finished
    Enumerated { status: Status, device_count: usize },

    /// System description received
    Described {
        status: Status,
        /// Described element, `None` for the whole system
        id: Option<String>,
        /// JSON description document
        description: String,
    },

    // ==================== Properties ====================
    /// Batched read finished
    PropertiesRead { results: Vec<PropertyResult> },

    /// Batched subscribe finished
    PropertiesSubscribed { results: Vec<PropertyResult> },

    /// Batched unsubscribe finished
    PropertiesUnsubscribed { results: Vec<PropertyResult> },

    /// Subscribed property changed
    PropertyUpdated { id: PropertyId, value: f64 },

    // ==================== Messages ====================
    /// Live device message
    DeviceMessage(DeviceMessage),

    /// Historical messages read
    MessagesRead {
        status: Status,
        count: usize,
        messages: Vec<DeviceMessage>,
    },
}

impl GatewayEvent {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayEvent::Connected { .. } => "connected",
            GatewayEvent::Disconnected => "disconnected",
            GatewayEvent::Error { .. } => "error",
            GatewayEvent::Enumerated { .. } => "enumerated",
            GatewayEvent::Described { .. } => "described",
            GatewayEvent::PropertiesRead { .. } => "properties-read",
            GatewayEvent::PropertiesSubscribed { .. } => "properties-subscribed",
            GatewayEvent::PropertiesUnsubscribed { .. } => "properties-unsubscribed",
            GatewayEvent::PropertyUpdated { .. } => "property-updated",
            GatewayEvent::DeviceMessage(_) => "device-message",
            GatewayEvent::MessagesRead { .. } => "messages-read",
        }
    }
}
