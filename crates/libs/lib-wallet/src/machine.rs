//! # Wallet State Machine
//!
//! Owns [`WalletState`] and [`TransactionState`] and is the only place either is
//! mutated. Every input is a [`WalletEvent`]; [`WalletMachine::apply`] returns a
//! [`Transition`] describing what happened.
//!
//! ## Connection
//!
//! ```text
//! Disconnected ──BeginConnect──▶ Connecting ──ConnectSucceeded──▶ Connected
//!      ▲                            │                                │
//!      └────────ConnectFailed───────┘◀──────────BeginConnect─────────┤
//!      ▲                                                             │
//!      └──────────────────────────Disconnect─────────────────────────┘
//! ```
//!
//! ## Demo Transaction (only while connected)
//!
//! ```text
//! Idle ─Begin─▶ AwaitingSignature ─Broadcast─▶ Pending ─Confirmed─▶ Succeeded
//!                      │                          │
//!                      └─────────Failed───────────┴──────────────▶ Failed
//! ```
//!
//! `BeginTransaction` restarts from any phase.
//!
//! ## Stale Results
//!
//! Work that suspends (a connection prompt, a demo transaction) takes a
//! [`Ticket`] when it starts and applies its result with
//! [`WalletMachine::apply_with`]. `BeginConnect` and `Disconnect` start a new
//! session; `BeginTransaction` and `Disconnect` start a new transaction attempt.
//! A ticket from an earlier session or attempt yields [`Outcome::Stale`] and the
//! event is discarded.

use shared::dto::wallet::{
    ConnectionStatus, TransactionPhase, TransactionState, WalletSnapshot, WalletState,
};
use tracing::debug;

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    BeginConnect,
    ConnectSucceeded {
        address: String,
        network: String,
        balance: String,
    },
    ConnectFailed(String),
    NetworkChanged(String),
    NetworkSwitchFailed(String),
    Disconnect,
    BeginTransaction(String),
    TransactionBroadcast(String),
    TransactionConfirmed {
        hash: String,
        message: String,
    },
    TransactionFailed(String),
}

impl WalletEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WalletEvent::BeginConnect => "BeginConnect",
            WalletEvent::ConnectSucceeded { .. } => "ConnectSucceeded",
            WalletEvent::ConnectFailed(_) => "ConnectFailed",
            WalletEvent::NetworkChanged(_) => "NetworkChanged",
            WalletEvent::NetworkSwitchFailed(_) => "NetworkSwitchFailed",
            WalletEvent::Disconnect => "Disconnect",
            WalletEvent::BeginTransaction(_) => "BeginTransaction",
            WalletEvent::TransactionBroadcast(_) => "TransactionBroadcast",
            WalletEvent::TransactionConfirmed { .. } => "TransactionConfirmed",
            WalletEvent::TransactionFailed(_) => "TransactionFailed",
        }
    }

    fn is_transaction_event(&self) -> bool {
        matches!(
            self,
            WalletEvent::TransactionBroadcast(_)
                | WalletEvent::TransactionConfirmed { .. }
                | WalletEvent::TransactionFailed(_)
        )
    }
}

/// Identifies the session and transaction attempt an async result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    session: u64,
    attempt: u64,
}

/// What an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed
    Applied,
    /// Not valid in the current state; nothing changed
    Ignored,
    /// Belonged to a superseded session or attempt; nothing changed
    Stale,
}

/// Result of [`WalletMachine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub outcome: Outcome,
    pub was_connected: bool,
    pub is_connected: bool,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }

    pub fn is_stale(&self) -> bool {
        self.outcome == Outcome::Stale
    }

    pub fn entered_connected(&self) -> bool {
        !self.was_connected && self.is_connected
    }

    pub fn left_connected(&self) -> bool {
        self.was_connected && !self.is_connected
    }
}

/// Wallet and demo transaction state with its transition rules.
#[derive(Debug, Clone, Default)]
pub struct WalletMachine {
    wallet: WalletState,
    transaction: TransactionState,
    session: u64,
    attempt: u64,
}

impl WalletMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    pub fn transaction(&self) -> &TransactionState {
        &self.transaction
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            wallet: self.wallet.clone(),
            transaction: self.transaction.clone(),
        }
    }

    /// Ticket for the current session and transaction attempt.
    pub fn ticket(&self) -> Ticket {
        Ticket {
            session: self.session,
            attempt: self.attempt,
        }
    }

    /// Apply an event that is tied to the attempt `ticket` was taken for.
    ///
    /// Connection events are checked against the session; transaction events
    /// against both the session and the transaction attempt.
    pub fn apply_with(&mut self, ticket: Ticket, event: WalletEvent) -> Transition {
        let superseded = ticket.session != self.session
            || (event.is_transaction_event() && ticket.attempt != self.attempt);

        if superseded {
            debug!(event = event.name(), "discarding stale wallet event");
            let connected = self.wallet.is_connected();
            return Transition {
                outcome: Outcome::Stale,
                was_connected: connected,
                is_connected: connected,
            };
        }

        self.apply(event)
    }

    /// Apply an event against the current state.
    pub fn apply(&mut self, event: WalletEvent) -> Transition {
        let was_connected = self.wallet.is_connected();
        let name = event.name();
        let applied = self.step(event);

        if !applied {
            debug!(
                event = name,
                status = self.wallet.connection_status.label(),
                phase = self.transaction.phase.label(),
                "ignoring wallet event"
            );
        }

        Transition {
            outcome: if applied { Outcome::Applied } else { Outcome::Ignored },
            was_connected,
            is_connected: self.wallet.is_connected(),
        }
    }

    fn step(&mut self, event: WalletEvent) -> bool {
        let status = self.wallet.connection_status;
        let phase = self.transaction.phase;

        match event {
            WalletEvent::BeginConnect => {
                if status == ConnectionStatus::Connecting {
                    return false;
                }
                self.session += 1;
                self.attempt += 1;
                self.wallet = WalletState {
                    connection_status: ConnectionStatus::Connecting,
                    ..WalletState::default()
                };
                self.transaction = TransactionState::default();
                true
            }
            WalletEvent::ConnectSucceeded {
                address,
                network,
                balance,
            } => {
                if status != ConnectionStatus::Connecting {
                    return false;
                }
                self.wallet = WalletState {
                    connection_status: ConnectionStatus::Connected,
                    address: Some(address),
                    network: Some(network),
                    balance,
                    last_error: None,
                };
                true
            }
            WalletEvent::ConnectFailed(error) => {
                if status != ConnectionStatus::Connecting {
                    return false;
                }
                self.wallet = WalletState {
                    last_error: Some(error),
                    ..WalletState::default()
                };
                true
            }
            WalletEvent::NetworkChanged(name) => {
                if status != ConnectionStatus::Connected {
                    return false;
                }
                self.wallet.network = Some(name);
                true
            }
            WalletEvent::NetworkSwitchFailed(error) => {
                if status != ConnectionStatus::Connected {
                    return false;
                }
                self.wallet.last_error = Some(error);
                true
            }
            WalletEvent::Disconnect => {
                self.session += 1;
                self.attempt += 1;
                self.wallet = WalletState::default();
                self.transaction = TransactionState::default();
                true
            }
            WalletEvent::BeginTransaction(kind) => {
                if status != ConnectionStatus::Connected {
                    return false;
                }
                self.attempt += 1;
                self.transaction = TransactionState {
                    phase: TransactionPhase::AwaitingSignature,
                    kind: Some(kind),
                    hash: None,
                    result_message: None,
                    error: None,
                };
                true
            }
            WalletEvent::TransactionBroadcast(hash) => {
                if status != ConnectionStatus::Connected
                    || phase != TransactionPhase::AwaitingSignature
                {
                    return false;
                }
                self.transaction.phase = TransactionPhase::Pending;
                self.transaction.hash = Some(hash);
                true
            }
            WalletEvent::TransactionConfirmed { hash, message } => {
                if status != ConnectionStatus::Connected || phase != TransactionPhase::Pending {
                    return false;
                }
                self.transaction.phase = TransactionPhase::Succeeded;
                self.transaction.hash = Some(hash);
                self.transaction.result_message = Some(message);
                self.transaction.error = None;
                true
            }
            WalletEvent::TransactionFailed(error) => {
                if status != ConnectionStatus::Connected || !phase.is_in_flight() {
                    return false;
                }
                self.transaction.phase = TransactionPhase::Failed;
                self.transaction.error = Some(error);
                self.transaction.result_message = None;
                true
            }
        }
    }
}
