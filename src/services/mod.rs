//! Service Layer
//!
//! The gateway client capability set, the events it emits, the connection
//! handshake and an in-process simulated gateway.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  requests   ┌───────────────────┐
//! │   Session    │ ──────────▶ │   GatewayClient   │
//! │  (app layer) │             │ (SimulatedGateway)│
//! └──────────────┘             └───────────────────┘
//!        ▲                               │
//!        └────────── GatewayEvent ───────┘
//! ```

mod client;
mod events;
pub mod handshake;
mod simulated;

pub use client::*;
pub use events::*;
pub use simulated::*;
