//! # Wallet State Data Transfer Objects
//!
//! Defines the connection state, demo transaction state and the snapshot the UI
//! renders. The state machine in `lib-wallet` is the only writer.

use serde::{Deserialize, Serialize};

/// Connection lifecycle of the injected wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Connected => "Connected",
        }
    }
}

/// Wallet connection state.
///
/// `address` and `network` are `Some` exactly when `connection_status` is
/// [`ConnectionStatus::Connected`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub connection_status: ConnectionStatus,
    pub address: Option<String>,
    /// Human-readable network name, resolved from the chain id
    pub network: Option<String>,
    /// Balance in ether, decimal formatted
    pub balance: String,
    pub last_error: Option<String>,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            connection_status: ConnectionStatus::Disconnected,
            address: None,
            network: None,
            balance: "0".to_string(),
            last_error: None,
        }
    }
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        self.connection_status == ConnectionStatus::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.connection_status == ConnectionStatus::Connecting
    }
}

/// Phase of the demo transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionPhase {
    #[default]
    Idle,
    AwaitingSignature,
    Pending,
    Succeeded,
    Failed,
}

impl TransactionPhase {
    /// A transaction has started and not yet reached a terminal phase.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TransactionPhase::AwaitingSignature | TransactionPhase::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionPhase::Idle => "Idle",
            TransactionPhase::AwaitingSignature => "Awaiting signature",
            TransactionPhase::Pending => "Pending",
            TransactionPhase::Succeeded => "Succeeded",
            TransactionPhase::Failed => "Failed",
        }
    }
}

/// Demo transaction state, nested under an active connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionState {
    pub phase: TransactionPhase,
    /// Caller-supplied label recorded when the transaction starts
    pub kind: Option<String>,
    pub hash: Option<String>,
    /// Set only in [`TransactionPhase::Succeeded`]
    pub result_message: Option<String>,
    /// Set only in [`TransactionPhase::Failed`]
    pub error: Option<String>,
}

/// Everything the UI needs to render the wallet widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub wallet: WalletState,
    pub transaction: TransactionState,
}
