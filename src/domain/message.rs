//! Message - Device Message Log Entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message raised by a device behind the gateway (alarm, warning, info)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceMessage {
    /// Device access the message originates from
    pub access_id: String,
    /// Device ID
    pub device_id: String,
    /// Message number as defined by the device
    pub message_id: u32,
    /// Message text
    pub message: String,
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
}

impl DeviceMessage {
    pub fn new(
        access_id: impl Into<String>,
        device_id: impl Into<String>,
        message_id: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            access_id: access_id.into(),
            device_id: device_id.into(),
            message_id,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// `access.device` source label
    pub fn source(&self) -> String {
        format!("{}.{}", self.access_id, self.device_id)
    }
}
