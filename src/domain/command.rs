//! Command - Property Write Commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::property::PropertyId;

/// Inverter control actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InverterCommand {
    TurnOn,
    TurnOff,
}

/// A fire-and-forget write to a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteCommand {
    /// Unique request ID (for tracing only, there is no acknowledgment)
    pub request_id: Uuid,
    /// Target property
    pub property_id: PropertyId,
    /// Value to write; command points take none
    pub value: Option<f64>,
    /// Request timestamp
    pub created_time: DateTime<Utc>,
}

impl WriteCommand {
    pub fn new(property_id: PropertyId, value: Option<f64>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            property_id,
            value,
            created_time: Utc::now(),
        }
    }

    /// A write without value, triggering a command point
    pub fn trigger(property_id: PropertyId) -> Self {
        Self::new(property_id, None)
    }
}
