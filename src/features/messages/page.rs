//! Messages Page
//!
//! The most recent device messages: the history is read on activation and
//! live messages are appended, keeping at most the configured number.

use crate::app::navigation::PageKind;
use crate::domain::message::DeviceMessage;
use crate::error::Result;
use crate::features::page::{DashboardPage, PageContext};
use crate::helpers::BoundedDeque;
use crate::services::Status;
use crate::utils::format::format_datetime;

#[derive(Debug, Clone)]
pub struct MessagesPage {
    messages: BoundedDeque<DeviceMessage>,
}

impl MessagesPage {
    pub fn new(limit: usize) -> Self {
        Self {
            messages: BoundedDeque::new(limit),
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &DeviceMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// One display line per message, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.messages
            .iter()
            .map(|message| {
                format!(
                    "{:<12} {} ({})  {}",
                    message.source(),
                    message.message,
                    message.message_id,
                    format_datetime(&message.timestamp)
                )
            })
            .collect()
    }
}

impl DashboardPage for MessagesPage {
    fn kind(&self) -> PageKind {
        PageKind::Messages
    }

    fn activate(&mut self, ctx: &PageContext<'_>) -> Result<()> {
        ctx.client.read_messages(self.messages.capacity())
    }

    fn deactivate(&mut self, _ctx: &PageContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_device_message(&mut self, message: &DeviceMessage) {
        self.messages.push(message.clone());
    }

    fn on_messages_read(&mut self, status: Status, messages: Vec<DeviceMessage>) {
        if status != Status::Success {
            tracing::warn!("Reading device messages failed: {}", status);
            return;
        }
        self.messages.replace(messages);
    }

    fn summary(&self) -> String {
        match self.messages.last() {
            Some(last) => format!(
                "{} message(s), latest: {} {}",
                self.messages.len(),
                last.source(),
                last.message
            ),
            None => "no messages".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{AppConfig, GatewayConfig};
    use crate::services::{ClientRequest, GatewayClient, SimulatedGateway};

    fn message(n: u32) -> DeviceMessage {
        DeviceMessage::new("demo", "inv", n, format!("message {n}"))
    }

    #[test]
    fn activation_reads_the_configured_limit() {
        let (gateway, _events) = SimulatedGateway::new();
        gateway
            .connect(&GatewayConfig::default())
            .expect("connect");
        gateway.clear_requests();
        let config = AppConfig::default();
        let ctx = PageContext {
            client: &gateway,
            installation: None,
            config: &config,
        };

        let mut page = MessagesPage::new(config.dashboard.message_limit);
        page.activate(&ctx).expect("activate");
        assert_eq!(gateway.requests(), vec![ClientRequest::ReadMessages(20)]);
    }

    #[test]
    fn live_messages_evict_the_oldest() {
        let mut page = MessagesPage::new(3);
        page.on_messages_read(Status::Success, (0..3).map(message).collect());
        page.on_device_message(&message(3));

        let ids: Vec<_> = page.messages().map(|m| m.message_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(page.lines().len(), 3);
        assert!(page.summary().contains("message 3"));
    }

    #[test]
    fn failed_read_keeps_the_list() {
        let mut page = MessagesPage::new(3);
        page.on_device_message(&message(7));
        page.on_messages_read(Status::Error, Vec::new());
        assert_eq!(page.len(), 1);
    }
}
