//! Handshake - Enumeration and Description Checks
//!
//! After connecting, the session enumerates the devices, requests the system
//! description and builds the [`Installation`] from it. Any failure here is
//! fatal to the connection attempt; the caller disconnects and surfaces it.

use crate::domain::description::{DescriptionFlags, SystemDescription};
use crate::domain::installation::{Driver, Installation};
use crate::error::HandshakeError;

use super::Status;

/// What the describe request asks for
pub const DESCRIPTION_FLAGS: DescriptionFlags = DescriptionFlags::INCLUDE_ACCESS_INFORMATION
    .union(DescriptionFlags::INCLUDE_DEVICE_INFORMATION);

/// Enumeration must succeed before describing
pub fn check_enumeration(status: Status) -> Result<(), HandshakeError> {
    match status {
        Status::Success => Ok(()),
        status => Err(HandshakeError::Enumeration { status }),
    }
}

/// Validate a description answer and build the installation it describes
pub fn installation_from_description(
    status: Status,
    description: &str,
) -> Result<Installation, HandshakeError> {
    if status != Status::Success {
        return Err(HandshakeError::Description { status });
    }
    let description: SystemDescription = serde_json::from_str(description)
        .map_err(|source| HandshakeError::Malformed { source })?;
    build_installation(description)
}

/// Exactly one device access with driver, devices and id is accepted
pub fn build_installation(description: SystemDescription) -> Result<Installation, HandshakeError> {
    let Some(mut instances) = description.instances else {
        return Err(HandshakeError::MissingInstances);
    };
    match instances.len() {
        0 => return Err(HandshakeError::NoInstallationFound),
        1 => {}
        count => return Err(HandshakeError::MultipleInstallations { count }),
    }
    let access = instances.remove(0);

    let Some(driver) = access.driver else {
        return Err(HandshakeError::MissingDriver);
    };
    let Some(devices) = access.devices else {
        return Err(HandshakeError::MissingDevices);
    };
    let Some(id) = access.id else {
        return Err(HandshakeError::MissingAccessId);
    };

    let driver = Driver::from_description(&driver, &devices)?;
    let installation = Installation::new(id, driver);
    tracing::info!(
        "Installation {} ({}): {} inverter(s), {} solar charger(s), {} battery",
        installation.device_access_id(),
        installation.driver().name(),
        installation.inverter_count(),
        installation.solar_charger_count(),
        installation.battery_count()
    );
    Ok(installation)
}
