//! # Observer Boundary
//!
//! The wallet manager reports outcomes to a [`WalletObserver`] so the
//! presentation layer can render feedback (toasts, spinners). The core never
//! renders anything itself.
//!
//! Callbacks run after the state change they describe has been applied, with no
//! internal lock held, so an observer may read
//! [`WalletManager::snapshot`](crate::manager::WalletManager::snapshot) freely.

use shared::dto::wallet::{TransactionPhase, WalletSnapshot};
use shared::utils::truncate_address;
use tracing::{info, warn};

/// Receiver of wallet notifications.
pub trait WalletObserver {
    fn on_connect_succeeded(&self, address: &str, network: &str);

    fn on_connect_failed(&self, message: &str);

    /// `detail` carries the prompt text, the hash, the result message or the
    /// error, depending on `phase`.
    fn on_transaction_phase_changed(&self, phase: TransactionPhase, detail: Option<&str>);

    fn on_network_changed(&self, name: &str);

    fn on_disconnected(&self) {}

    /// Called after every applied transition.
    fn on_state_changed(&self, _snapshot: &WalletSnapshot) {}
}

/// Observer that only writes log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl WalletObserver for LogObserver {
    fn on_connect_succeeded(&self, address: &str, network: &str) {
        info!(address = %truncate_address(address), network, "Wallet connected successfully!");
    }

    fn on_connect_failed(&self, message: &str) {
        warn!(message, "wallet connection failed");
    }

    fn on_transaction_phase_changed(&self, phase: TransactionPhase, detail: Option<&str>) {
        info!(phase = phase.label(), detail = detail.unwrap_or(""), "demo transaction");
    }

    fn on_network_changed(&self, name: &str) {
        info!("Network changed to {}", name);
    }

    fn on_disconnected(&self) {
        info!("Wallet disconnected");
    }
}
