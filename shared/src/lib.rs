//! # Shared Wallet Types Library
//!
//! This library defines the state contract between the wallet core
//! (`lib-wallet`) and the UI-facing crates (`wallet-web`). The types are plain
//! data: every mutation goes through the state machine in `lib-wallet`, and
//! everything here is what the UI observes.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects observed by the UI
//!   - **[`dto::wallet`]**: Connection, transaction and snapshot types
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::truncate_address`]**: Shorten `0x` addresses for display
//!   - **[`utils::format_ether`]**: Render wei amounts as decimal ether
//!
//! ## Wire Format
//!
//! The DTOs serialize with the default `serde` behavior so the browser crate can
//! hand them to JavaScript unchanged:
//! - Field names use **snake_case**
//! - Enums serialize to **snake_case** strings (`"awaiting_signature"`)
//! - Optional fields serialize as `null` when `None`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::wallet::{ConnectionStatus, WalletSnapshot};
//! use shared::utils::truncate_address;
//!
//! let snapshot = WalletSnapshot::default();
//! assert_eq!(snapshot.wallet.connection_status, ConnectionStatus::Disconnected);
//! assert_eq!(truncate_address("0xABCD00000000000000000000000000000000001234"), "0xABCD...1234");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
