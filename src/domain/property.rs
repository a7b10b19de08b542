//! Property - Gateway Property Identifiers and Read Results

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::Status;

/// Dotted property identifier: `<device-access-id>.<device-id>.<point-code>`
#[derive(Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(Arc<str>);

impl PropertyId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Build an id from its three segments
    pub fn compose(device_access_id: &str, device_id: &str, point_code: u32) -> Self {
        Self::new(format!("{device_access_id}.{device_id}.{point_code}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The device access segment, if the id is well formed
    pub fn device_access_id(&self) -> Option<&str> {
        self.segments().map(|(access, _, _)| access)
    }

    /// The device segment, if the id is well formed
    pub fn device_id(&self) -> Option<&str> {
        self.segments().map(|(_, device, _)| device)
    }

    /// The numeric point code, if the id is well formed
    pub fn point_code(&self) -> Option<u32> {
        self.segments().and_then(|(_, _, point)| point.parse().ok())
    }

    fn segments(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.0.splitn(3, '.');
        let access = parts.next()?;
        let device = parts.next()?;
        let point = parts.next()?;
        if point.contains('.') {
            return None;
        }
        Some((access, device, point))
    }
}

impl From<&str> for PropertyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PropertyId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-id result of a batched read, subscribe or unsubscribe request
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyResult {
    pub id: PropertyId,
    pub status: Status,
    /// Present for successful reads only
    pub value: Option<f64>,
}

impl PropertyResult {
    pub fn success(id: PropertyId, value: Option<f64>) -> Self {
        Self {
            id,
            status: Status::Success,
            value,
        }
    }

    pub fn failure(id: PropertyId, status: Status) -> Self {
        Self {
            id,
            status,
            value: None,
        }
    }

    /// The value, if the read succeeded and carried one
    pub fn successful_value(&self) -> Option<f64> {
        match self.status {
            Status::Success => self.value,
            _ => None,
        }
    }
}
