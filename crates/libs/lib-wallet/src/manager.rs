//! # Wallet Manager
//!
//! The UI-facing command API. Composes the [`ProviderGateway`], the
//! [`WalletMachine`], the [`EventBridge`] and a [`WalletObserver`].
//!
//! ## Commands
//!
//! | Command | Guard | Result |
//! |---------|-------|--------|
//! | [`connect`](WalletManager::connect) | skipped unless disconnected | connected, or disconnected with an error |
//! | [`disconnect`](WalletManager::disconnect) | none | initial state |
//! | [`submit_demo_transaction`](WalletManager::submit_demo_transaction) | skipped unless connected and idle/terminal | succeeded or failed |
//! | [`switch_network`](WalletManager::switch_network) | fails unless connected | provider prompt; the change itself arrives as an event |
//!
//! Every state change goes through one private entry point, which also keeps
//! the provider subscription and gateway session in step with the connection:
//! entering `Connected` begins the session and subscribes, leaving it ends the
//! session and unsubscribes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lib_wallet::{CommandOutcome, LogObserver, WalletConfig, WalletManager};
//!
//! let manager = WalletManager::new(provider, timer, LogObserver, WalletConfig::default());
//! assert_eq!(manager.connect().await, CommandOutcome::Completed);
//! manager.submit_demo_transaction("demo").await;
//! manager.disconnect();
//! ```

use parking_lot::Mutex;
use shared::dto::wallet::{
    ConnectionStatus, TransactionPhase, TransactionState, WalletSnapshot, WalletState,
};
use shared::utils::truncate_address;
use tracing::{debug, info, warn};

use crate::bridge::EventBridge;
use crate::config::WalletConfig;
use crate::error::{Result, WalletError};
use crate::gateway::ProviderGateway;
use crate::machine::{Ticket, Transition, WalletEvent, WalletMachine};
use crate::observer::WalletObserver;
use crate::provider::{Envelope, Provider, Timer};

/// Text shown while the (simulated) wallet prompt is open.
pub const SIGNATURE_PROMPT: &str = "Confirm transaction in your wallet...";

/// How a command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Ran to completion
    Completed,
    /// Guard rejected the command; nothing happened
    Skipped,
    /// Failed; the error is recorded in state and was sent to the observer
    Failed(WalletError),
    /// Finished for a session or attempt that was superseded; result discarded
    Stale,
}

/// Command facade over the wallet provider.
pub struct WalletManager<P, T, O> {
    gateway: ProviderGateway<P, T>,
    machine: Mutex<WalletMachine>,
    bridge: EventBridge,
    inbox: async_channel::Receiver<Envelope>,
    observer: O,
}

impl<P: Provider, T: Timer, O: WalletObserver> WalletManager<P, T, O> {
    pub fn new(provider: P, timer: T, observer: O, config: WalletConfig) -> Self {
        let (sender, inbox) = async_channel::unbounded();
        Self {
            gateway: ProviderGateway::new(provider, timer, config),
            machine: Mutex::new(WalletMachine::new()),
            bridge: EventBridge::new(sender),
            inbox,
            observer,
        }
    }

    pub fn gateway(&self) -> &ProviderGateway<P, T> {
        &self.gateway
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn is_provider_installed(&self) -> bool {
        self.gateway.detect()
    }

    pub fn is_subscribed(&self) -> bool {
        self.bridge.is_attached()
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.machine.lock().snapshot()
    }

    pub fn wallet_state(&self) -> WalletState {
        self.machine.lock().wallet().clone()
    }

    pub fn transaction_state(&self) -> TransactionState {
        self.machine.lock().transaction().clone()
    }

    /// Single entry point for state changes.
    fn settle(&self, step: impl FnOnce(&mut WalletMachine) -> Transition) -> (Transition, Ticket) {
        let (transition, ticket, address, snapshot) = {
            let mut machine = self.machine.lock();
            let transition = step(&mut machine);
            let address = machine.wallet().address.clone();
            let snapshot = transition.is_applied().then(|| machine.snapshot());
            (transition, machine.ticket(), address, snapshot)
        };

        if transition.left_connected() {
            self.bridge.detach(&self.gateway);
            self.gateway.end_session();
        }
        if transition.entered_connected() {
            if let Some(address) = address.as_deref() {
                self.gateway.begin_session(address);
            }
            self.bridge.attach(&self.gateway);
        }
        if let Some(snapshot) = snapshot {
            self.observer.on_state_changed(&snapshot);
        }

        (transition, ticket)
    }

    /// Connect to the wallet.
    ///
    /// Skipped while connecting or connected, so overlapping calls make a single
    /// provider request.
    pub async fn connect(&self) -> CommandOutcome {
        let status = self.machine.lock().wallet().connection_status;
        if status != ConnectionStatus::Disconnected {
            debug!(status = status.label(), "connect skipped");
            return CommandOutcome::Skipped;
        }

        let (begin, ticket) = self.settle(|machine| machine.apply(WalletEvent::BeginConnect));
        if !begin.is_applied() {
            return CommandOutcome::Skipped;
        }
        info!("connecting wallet");

        match self.establish().await {
            Ok(event) => {
                let (transition, _) = self.settle(|machine| machine.apply_with(ticket, event));
                if !transition.is_applied() {
                    debug!("connection finished after the attempt was superseded");
                    return CommandOutcome::Stale;
                }

                let wallet = self.wallet_state();
                let address = wallet.address.unwrap_or_default();
                let network = wallet.network.unwrap_or_default();
                info!(
                    address = %truncate_address(&address),
                    network = %network,
                    "wallet connected"
                );
                self.observer.on_connect_succeeded(&address, &network);
                CommandOutcome::Completed
            }
            Err(error) => {
                let message = error.to_string();
                let (transition, _) = self.settle(|machine| {
                    machine.apply_with(ticket, WalletEvent::ConnectFailed(message.clone()))
                });
                if !transition.is_applied() {
                    debug!(
                        error = %message,
                        "connection failure after the attempt was superseded"
                    );
                    return CommandOutcome::Stale;
                }

                warn!(error = %message, "wallet connection failed");
                self.observer.on_connect_failed(&message);
                CommandOutcome::Failed(error)
            }
        }
    }

    async fn establish(&self) -> Result<WalletEvent> {
        let grant = self.gateway.request_connection().await?;
        let network = self.gateway.resolve_network_name(&grant.chain_id);
        let balance = self.gateway.fetch_balance(&grant.address).await;

        Ok(WalletEvent::ConnectSucceeded {
            address: grant.address,
            network,
            balance,
        })
    }

    /// Tear down subscriptions and reset to the initial state, whatever the
    /// current phase.
    pub fn disconnect(&self) -> CommandOutcome {
        self.bridge.detach(&self.gateway);
        self.gateway.end_session();
        self.settle(|machine| machine.apply(WalletEvent::Disconnect));

        info!("wallet disconnected");
        self.observer.on_disconnected();
        CommandOutcome::Completed
    }

    /// Run the simulated demo transaction.
    ///
    /// Skipped unless connected, and while another demo transaction is in flight.
    pub async fn submit_demo_transaction(&self, label: &str) -> CommandOutcome {
        {
            let machine = self.machine.lock();
            if !machine.wallet().is_connected() {
                debug!("demo transaction skipped, wallet not connected");
                return CommandOutcome::Skipped;
            }
            if machine.transaction().phase.is_in_flight() {
                debug!("demo transaction skipped, another one is in flight");
                return CommandOutcome::Skipped;
            }
        }

        let (begin, ticket) = self.settle(|machine| {
            machine.apply(WalletEvent::BeginTransaction(label.to_string()))
        });
        if !begin.is_applied() {
            return CommandOutcome::Skipped;
        }
        self.observer.on_transaction_phase_changed(
            TransactionPhase::AwaitingSignature,
            Some(SIGNATURE_PROMPT),
        );

        let pending = match self.gateway.submit_demo_transaction(label).await {
            Ok(pending) => pending,
            Err(error) => return self.fail_transaction(ticket, error),
        };

        let hash = pending.hash().to_string();
        let (broadcast, _) = self.settle(|machine| {
            machine.apply_with(ticket, WalletEvent::TransactionBroadcast(hash.clone()))
        });
        if !broadcast.is_applied() {
            return CommandOutcome::Stale;
        }
        self.observer
            .on_transaction_phase_changed(TransactionPhase::Pending, Some(&hash));

        let receipt = match pending.confirm().await {
            Ok(receipt) => receipt,
            Err(error) => return self.fail_transaction(ticket, error),
        };

        let message = self.gateway.config().success_message.clone();
        let (confirmed, _) = self.settle(|machine| {
            machine.apply_with(
                ticket,
                WalletEvent::TransactionConfirmed {
                    hash: receipt.hash,
                    message: message.clone(),
                },
            )
        });
        if !confirmed.is_applied() {
            return CommandOutcome::Stale;
        }

        info!(label, "demo transaction succeeded");
        self.observer
            .on_transaction_phase_changed(TransactionPhase::Succeeded, Some(&message));
        CommandOutcome::Completed
    }

    fn fail_transaction(&self, ticket: Ticket, error: WalletError) -> CommandOutcome {
        let message = error.to_string();
        let (transition, _) = self.settle(|machine| {
            machine.apply_with(ticket, WalletEvent::TransactionFailed(message.clone()))
        });
        if !transition.is_applied() {
            return CommandOutcome::Stale;
        }

        warn!(error = %message, "demo transaction failed");
        self.observer
            .on_transaction_phase_changed(TransactionPhase::Failed, Some(&message));
        CommandOutcome::Failed(error)
    }

    /// Ask the wallet to switch networks.
    ///
    /// On success the new network is applied when the provider's
    /// `chainChanged` event arrives.
    pub async fn switch_network(&self, chain_id: &str) -> CommandOutcome {
        let ticket = {
            let machine = self.machine.lock();
            if !machine.wallet().is_connected() {
                return CommandOutcome::Failed(WalletError::NotConnected);
            }
            machine.ticket()
        };

        match self.gateway.request_network_switch(chain_id).await {
            Ok(()) => CommandOutcome::Completed,
            Err(error) => {
                let message = error.to_string();
                let (transition, _) = self.settle(|machine| {
                    machine.apply_with(ticket, WalletEvent::NetworkSwitchFailed(message.clone()))
                });
                if transition.is_stale() {
                    return CommandOutcome::Stale;
                }
                CommandOutcome::Failed(error)
            }
        }
    }

    /// Apply one queued provider event. Returns whether it changed state.
    pub fn handle_provider_event(&self, envelope: Envelope) -> bool {
        let Some(event) = self.bridge.translate(envelope) else {
            return false;
        };

        match event {
            WalletEvent::Disconnect => {
                self.disconnect();
                true
            }
            WalletEvent::NetworkChanged(name) => {
                let (transition, _) = self.settle(|machine| {
                    machine.apply(WalletEvent::NetworkChanged(name.clone()))
                });
                if transition.is_applied() {
                    self.observer.on_network_changed(&name);
                }
                transition.is_applied()
            }
            other => self.settle(|machine| machine.apply(other)).0.is_applied(),
        }
    }

    /// Apply every provider event queued so far. Returns how many changed state.
    pub fn process_pending_events(&self) -> usize {
        let mut applied = 0;
        while let Ok(envelope) = self.inbox.try_recv() {
            if self.handle_provider_event(envelope) {
                applied += 1;
            }
        }
        applied
    }

    /// Apply provider events as they arrive until [`shutdown`](Self::shutdown).
    pub async fn run_event_loop(&self) {
        while let Ok(envelope) = self.inbox.recv().await {
            self.handle_provider_event(envelope);
        }
        debug!("wallet event loop stopped");
    }

    /// Unsubscribe from the provider and stop the event loop.
    pub fn shutdown(&self) {
        self.bridge.detach(&self.gateway);
        self.inbox.close();
    }
}
