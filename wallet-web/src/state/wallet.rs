//! Wallet notifications forwarded to the page

use js_sys::Function;
use lib_wallet::{CommandOutcome, WalletError, WalletObserver};
use serde::Serialize;
use shared::dto::wallet::{TransactionPhase, WalletSnapshot};
use wasm_bindgen::JsValue;

/// Payload handed to the page's notification callback, tagged by `kind`.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Notice<'a> {
    ConnectSucceeded { address: &'a str, network: &'a str },
    ConnectFailed { message: &'a str },
    TransactionPhase {
        phase: TransactionPhase,
        detail: Option<&'a str>,
    },
    NetworkChanged { network: &'a str },
    Disconnected,
    StateChanged { snapshot: &'a WalletSnapshot },
}

/// [`WalletObserver`] that calls an optional JavaScript function.
pub struct JsObserver {
    callback: Option<Function>,
}

impl JsObserver {
    pub fn new(callback: Option<Function>) -> Self {
        Self { callback }
    }

    fn notify(&self, notice: Notice<'_>) {
        let Some(callback) = &self.callback else {
            return;
        };

        let payload = match serde_wasm_bindgen::to_value(&notice) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Failed to encode wallet notice: {}", e);
                return;
            }
        };

        if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
            log::warn!("Wallet notice callback threw: {:?}", e);
        }
    }
}

impl WalletObserver for JsObserver {
    fn on_connect_succeeded(&self, address: &str, network: &str) {
        log::info!("Wallet connected successfully!");
        self.notify(Notice::ConnectSucceeded { address, network });
    }

    fn on_connect_failed(&self, message: &str) {
        log::warn!("Wallet connection failed: {}", message);
        self.notify(Notice::ConnectFailed { message });
    }

    fn on_transaction_phase_changed(&self, phase: TransactionPhase, detail: Option<&str>) {
        self.notify(Notice::TransactionPhase { phase, detail });
    }

    fn on_network_changed(&self, name: &str) {
        log::info!("Network changed to {}", name);
        self.notify(Notice::NetworkChanged { network: name });
    }

    fn on_disconnected(&self) {
        self.notify(Notice::Disconnected);
    }

    fn on_state_changed(&self, snapshot: &WalletSnapshot) {
        self.notify(Notice::StateChanged { snapshot });
    }
}

/// How a command promise resolves on the page.
///
/// `code` is [`WalletError::code`], so the page can tell a rejected prompt from
/// one that is still open without matching on message text.
#[derive(Debug, Serialize)]
pub struct CommandReport {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandReport {
    fn settled(outcome: &'static str) -> Self {
        Self {
            outcome,
            code: None,
            error: None,
        }
    }

    fn failed(error: &WalletError) -> Self {
        Self {
            outcome: "failed",
            code: Some(error.code()),
            error: Some(error.to_string()),
        }
    }
}

impl From<CommandOutcome> for CommandReport {
    fn from(outcome: CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Completed => Self::settled("completed"),
            CommandOutcome::Skipped => Self::settled("skipped"),
            CommandOutcome::Stale => Self::settled("stale"),
            CommandOutcome::Failed(error) => Self::failed(&error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_carries_code_and_message() {
        let report = CommandReport::from(CommandOutcome::Failed(WalletError::UserRejected));
        assert_eq!(report.outcome, "failed");
        assert_eq!(report.code, Some("UserRejected"));
        assert_eq!(
            report.error.as_deref(),
            Some("User rejected the connection request")
        );

        let pending = CommandReport::from(CommandOutcome::Failed(
            WalletError::RequestAlreadyPending,
        ));
        assert_eq!(pending.code, Some("RequestAlreadyPending"));
    }

    #[test]
    fn test_report_json_shape() {
        let skipped = serde_json::to_value(CommandReport::from(CommandOutcome::Skipped)).unwrap();
        assert_eq!(skipped, serde_json::json!({ "outcome": "skipped" }));

        let failed = serde_json::to_value(CommandReport::from(CommandOutcome::Failed(
            WalletError::UserRejected,
        )))
        .unwrap();
        assert_eq!(
            failed,
            serde_json::json!({
                "outcome": "failed",
                "code": "UserRejected",
                "error": "User rejected the connection request"
            })
        );
    }

    #[test]
    fn test_notice_is_tagged_by_kind() {
        let json = serde_json::to_value(Notice::TransactionPhase {
            phase: TransactionPhase::Pending,
            detail: Some("0xabc"),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "transaction_phase",
                "phase": "pending",
                "detail": "0xabc"
            })
        );
    }
}
