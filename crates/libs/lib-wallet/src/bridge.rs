//! # Event Bridge
//!
//! Connects provider-pushed events to the state machine.
//!
//! While the wallet is connected the bridge holds one subscription on the
//! provider's `accountsChanged` and `chainChanged` streams. Each attach gets a
//! fresh subscription id; envelopes carrying any other id are dropped, so events
//! queued by an earlier session cannot reach a later one.

use parking_lot::Mutex;
use tracing::debug;

use crate::gateway::ProviderGateway;
use crate::machine::WalletEvent;
use crate::network;
use crate::provider::{Envelope, EventSink, Provider, ProviderEvent, Timer};

#[derive(Debug, Default)]
struct Subscriptions {
    active: Option<u64>,
    issued: u64,
}

/// Owns the provider subscription lifetime and translates provider events.
pub struct EventBridge {
    sender: async_channel::Sender<Envelope>,
    subscriptions: Mutex<Subscriptions>,
}

impl EventBridge {
    pub fn new(sender: async_channel::Sender<Envelope>) -> Self {
        Self {
            sender,
            subscriptions: Mutex::new(Subscriptions::default()),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscriptions.lock().active.is_some()
    }

    /// Subscribe to account and network events. Returns `false` if already attached.
    pub fn attach<P: Provider, T: Timer>(&self, gateway: &ProviderGateway<P, T>) -> bool {
        let subscription = {
            let mut subscriptions = self.subscriptions.lock();
            if subscriptions.active.is_some() {
                return false;
            }
            subscriptions.issued += 1;
            subscriptions.active = Some(subscriptions.issued);
            subscriptions.issued
        };

        debug!(subscription, "subscribing to wallet events");
        let sink = EventSink::new(subscription, self.sender.clone());
        gateway.subscribe_accounts(sink.clone());
        gateway.subscribe_network(sink);
        true
    }

    /// Tear down the active subscription. Returns `false` if nothing was attached.
    pub fn detach<P: Provider, T: Timer>(&self, gateway: &ProviderGateway<P, T>) -> bool {
        let Some(subscription) = self.subscriptions.lock().active.take() else {
            return false;
        };

        debug!(subscription, "unsubscribing from wallet events");
        gateway.unsubscribe_all();
        true
    }

    /// Translate an envelope into a state machine event.
    ///
    /// Returns `None` for envelopes from inactive subscriptions and for
    /// account changes that still carry accounts.
    pub fn translate(&self, envelope: Envelope) -> Option<WalletEvent> {
        if self.subscriptions.lock().active != Some(envelope.subscription) {
            debug!(
                subscription = envelope.subscription,
                "dropping event from inactive subscription"
            );
            return None;
        }

        match envelope.event {
            ProviderEvent::AccountsChanged(accounts) if accounts.is_empty() => {
                debug!("wallet locked or access revoked");
                Some(WalletEvent::Disconnect)
            }
            ProviderEvent::AccountsChanged(accounts) => {
                debug!(count = accounts.len(), "account list changed, keeping session");
                None
            }
            ProviderEvent::ChainChanged(chain_id) => {
                Some(WalletEvent::NetworkChanged(network::name_for(&chain_id)))
            }
        }
    }
}
