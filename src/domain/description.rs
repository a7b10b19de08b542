//! Description - System Description Document
//!
//! The gateway answers a describe request with a JSON document listing its
//! device access instances. Every field is optional here so the handshake can
//! report exactly which part is missing.

use serde::{Deserialize, Serialize};

/// Flags selecting what a describe request should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescriptionFlags(u8);

impl DescriptionFlags {
    pub const INCLUDE_ACCESS_INFORMATION: Self = Self(1 << 0);
    pub const INCLUDE_DEVICE_INFORMATION: Self = Self(1 << 1);
    pub const INCLUDE_PROPERTY_INFORMATION: Self = Self(1 << 2);
    pub const INCLUDE_DRIVER_INFORMATION: Self = Self(1 << 3);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for DescriptionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Top level description document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemDescription {
    pub instances: Option<Vec<DeviceAccessDescription>>,
}

/// One device access instance (one physical/logical connection)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceAccessDescription {
    pub id: Option<String>,
    pub driver: Option<String>,
    pub devices: Option<Vec<DeviceDescriptor>>,
}

/// A device behind a device access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl DeviceDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: None,
        }
    }
}
