//! # Data Transfer Objects (DTOs)
//!
//! State types shared between the wallet core and the browser surface.
//!
//! ## Module Organization
//!
//! - [`wallet`] - Wallet connection state, demo transaction state and the combined snapshot
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "wallet": {
//!     "connection_status": "connected",
//!     "address": "0xabcd...",
//!     "network": "Ethereum Mainnet",
//!     "balance": "1.25",
//!     "last_error": null
//!   },
//!   "transaction": {
//!     "phase": "pending",
//!     "kind": "demo",
//!     "hash": "0x5f1c...",
//!     "result_message": null,
//!     "error": null
//!   }
//! }
//! ```

pub mod wallet;

pub use wallet::*;
