//! Application - Headless Dashboard Runner
//!
//! Builds the simulated gateway and the session, then pumps gateway events on
//! a timer while cycling through the dashboard pages. Application events are
//! written to the log, which stands in for the rendering front-end.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use tokio::time::{Instant, MissedTickBehavior};

use crate::app::navigation::PageKind;
use crate::app::session::Session;
use crate::constants::EVENT_LOG_CAPACITY;
use crate::domain::config::AppConfig;
use crate::domain::message::DeviceMessage;
use crate::error::Result;
use crate::eventing::app_event::{AppEvent, LogLevel};
use crate::features::page::DashboardPage;
use crate::helpers::BoundedDeque;
use crate::services::{GatewayClient, SimulatedGateway};

/// Device message texts pushed by the simulated devices, round robin
const DEMO_MESSAGES: [(u32, &str); 3] = [
    (14, "AC-In synchronization in progress"),
    (22, "Battery charge phase changed to absorption"),
    (81, "Solar charger reached maximum power point"),
];

/// Run the dashboard against the simulated gateway until the configured run
/// time elapses or Ctrl-C is received
pub async fn run_headless(config: AppConfig) -> Result<()> {
    let (gateway, gateway_events) = SimulatedGateway::new();
    let gateway = Arc::new(gateway);
    let (app_tx, app_events) = crossbeam_channel::unbounded::<AppEvent>();

    let tick = Duration::from_millis(config.dashboard.tick_interval_ms.max(1));
    let dwell = Duration::from_secs(config.dashboard.page_dwell_secs.max(1));
    let run_for = match config.dashboard.run_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let client: Arc<dyn GatewayClient> = gateway.clone();
    let mut session = Session::new(client, config, app_tx);
    let mut event_log = BoundedDeque::new(EVENT_LOG_CAPACITY);

    tracing::info!("Starting headless dashboard");
    session.start();
    session.pump(&gateway_events);
    drain_app_events(&app_events, &mut event_log);

    let started = Instant::now();
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut cycle = PageKind::dashboards().iter().copied().cycle().skip(1);
    let mut last_switch = started;
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    tracing::warn!("Waiting for Ctrl-C failed: {}", e);
                }
                tracing::info!("Interrupted");
                break;
            }
        }
        ticks += 1;

        if let Err(e) = gateway.tick() {
            tracing::warn!("Gateway tick failed: {}", e);
        }
        if ticks % 7 == 0 {
            let (message_id, text) = DEMO_MESSAGES[(ticks / 7) as usize % DEMO_MESSAGES.len()];
            let message = DeviceMessage::new("demo", "inv", message_id, text);
            if let Err(e) = gateway.push_message(message) {
                tracing::warn!("Pushing device message failed: {}", e);
            }
        }
        session.pump(&gateway_events);

        if session.installation().is_some() && last_switch.elapsed() >= dwell {
            last_switch = Instant::now();
            log_page_view(&session);
            match cycle.next() {
                Some(PageKind::Messages) => session.open_messages(),
                Some(next) => session.change_to_page(next),
                None => {}
            }
            if session.pages().active() == Some(PageKind::Overview)
                && session.pages().overview().unread_messages() >= 2
            {
                if let Err(e) = session.toggle_inverter() {
                    tracing::warn!("Toggling the inverter failed: {}", e);
                }
            }
            session.pump(&gateway_events);
        }

        drain_app_events(&app_events, &mut event_log);

        if run_for.is_some_and(|limit| started.elapsed() >= limit) {
            tracing::info!("Run time elapsed");
            break;
        }
    }

    log_page_view(&session);
    if let Err(e) = session.connect_or_disconnect() {
        tracing::warn!("Disconnecting failed: {}", e);
    }
    session.pump(&gateway_events);
    drain_app_events(&app_events, &mut event_log);
    tracing::info!(
        "Headless dashboard stopped after {} ticks, {} application events",
        ticks,
        event_log.len()
    );
    Ok(())
}

fn log_page_view(session: &Session) {
    if let Some(kind) = session.pages().active() {
        tracing::info!("[{}] {}", kind, session.pages().page(kind).summary());
    }
}

/// Log every queued application event and keep it in the event log
fn drain_app_events(events: &Receiver<AppEvent>, log: &mut BoundedDeque<AppEvent>) {
    for event in events.try_iter() {
        match &event {
            AppEvent::Log {
                level,
                message,
                timestamp,
            } => match level {
                LogLevel::Error => tracing::error!("{} {}", timestamp.format("%H:%M:%S"), message),
                LogLevel::Warn => tracing::warn!("{} {}", timestamp.format("%H:%M:%S"), message),
                LogLevel::Info => tracing::info!("{} {}", timestamp.format("%H:%M:%S"), message),
                LogLevel::Debug => tracing::debug!("{} {}", timestamp.format("%H:%M:%S"), message),
            },
            AppEvent::ConnectionChanged { connected, detail } => {
                let state = if *connected { "Connected" } else { "Disconnected" };
                match detail {
                    Some(detail) => tracing::info!("{} ({})", state, detail),
                    None => tracing::info!("{}", state),
                }
            }
            AppEvent::InstallationReady {
                device_access_id,
                driver,
                inverters,
                solar_chargers,
                batteries,
            } => tracing::info!(
                "Installation {} ({}): {} inverter(s), {} solar charger(s), {} battery",
                device_access_id,
                driver,
                inverters,
                solar_chargers,
                batteries
            ),
            AppEvent::HandshakeFailed { title, message } => {
                tracing::error!("{}: {}", title, message)
            }
            AppEvent::PageChanged { page } => tracing::info!("Showing {}", page.title()),
        }
        log.push(event);
    }
}
