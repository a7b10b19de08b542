//! GatewayClient - Capability Set of the Gateway Client
//!
//! Every request returns as soon as it has been queued. Completion is
//! reported later as a [`GatewayEvent`](super::GatewayEvent) on the client's
//! event channel; an `Err` here only means the request could not be issued.

use crate::domain::command::WriteCommand;
use crate::domain::config::GatewayConfig;
use crate::domain::description::DescriptionFlags;
use crate::domain::property::PropertyId;
use crate::error::Result;

use super::ConnectionState;

pub trait GatewayClient: Send + Sync {
    fn state(&self) -> ConnectionState;

    fn connect(&self, config: &GatewayConfig) -> Result<()>;
    fn disconnect(&self) -> Result<()>;

    fn enumerate(&self) -> Result<()>;
    fn describe(&self, flags: DescriptionFlags) -> Result<()>;

    fn read_properties(&self, ids: &[PropertyId]) -> Result<()>;
    fn subscribe_to_properties(&self, ids: &[PropertyId]) -> Result<()>;
    fn unsubscribe_from_properties(&self, ids: &[PropertyId]) -> Result<()>;

    /// No acknowledgment; the effect shows up through subscribed updates
    fn write_property(&self, command: WriteCommand) -> Result<()>;

    /// Read the last `limit` device messages
    fn read_messages(&self, limit: usize) -> Result<()>;
}
