//! # Wallet Library
//!
//! Wallet connection and demo transaction state management for the storefront.
//!
//! ## Modules
//!
//! - [`network`] - Chain id to network name registry
//! - [`error`] - [`WalletError`] taxonomy and raw [`ProviderFault`]s
//! - [`config`] - Demo transaction timing
//! - [`provider`] - [`Provider`] and [`Timer`] traits implemented by the host
//! - [`gateway`] - Provider calls with normalized errors
//! - [`machine`] - The state machine, the only writer of wallet state
//! - [`bridge`] - Provider subscriptions and event translation
//! - [`observer`] - Notifications for the presentation layer
//! - [`manager`] - The command facade used by the UI
//!
//! ## Architecture
//!
//! ```text
//! UI ──command──▶ WalletManager ──▶ ProviderGateway ──▶ Provider
//!                      │                                   │
//!                      ▼                                   │ accountsChanged / chainChanged
//!                 WalletMachine ◀── EventBridge ◀── inbox ◀┘
//!                      │
//!                      ▼
//!               WalletObserver / snapshot()
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod gateway;
pub mod machine;
pub mod manager;
pub mod network;
pub mod observer;
pub mod provider;

// Re-export commonly used types
pub use config::WalletConfig;
pub use error::{ProviderFault, Result, WalletError};
pub use machine::{Outcome, Transition, WalletEvent, WalletMachine};
pub use manager::{CommandOutcome, WalletManager};
pub use network::NetworkDescriptor;
pub use observer::{LogObserver, WalletObserver};
pub use provider::{Envelope, EventSink, EventStream, Provider, ProviderEvent, Timer};
