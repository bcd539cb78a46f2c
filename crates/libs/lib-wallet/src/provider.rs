//! # Provider Boundary
//!
//! Traits for the injected wallet and the host timer, enabling the browser
//! binding in `wallet-web` and scripted providers in tests.
//!
//! The wallet runs on a single cooperative task, so both traits are `?Send`.
//!
//! ## Event Delivery
//!
//! Providers push events by calling [`EventSink::emit`]. The sink does not run
//! any wallet logic; it queues an [`Envelope`] tagged with the subscription that
//! produced it, and the wallet manager applies queued envelopes one at a time.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::ProviderFault;

/// Named event streams a provider can push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStream {
    AccountsChanged,
    ChainChanged,
}

impl EventStream {
    /// Event name on the EIP-1193 provider object.
    pub fn event_name(&self) -> &'static str {
        match self {
            EventStream::AccountsChanged => "accountsChanged",
            EventStream::ChainChanged => "chainChanged",
        }
    }
}

/// Event pushed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// New account list; empty when the wallet was locked or access revoked
    AccountsChanged(Vec<String>),
    /// New hex chain id
    ChainChanged(String),
}

/// A provider event together with the subscription that delivered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub subscription: u64,
    pub event: ProviderEvent,
}

/// Write end of the wallet's event inbox, handed to [`Provider::on`].
#[derive(Debug, Clone)]
pub struct EventSink {
    subscription: u64,
    sender: async_channel::Sender<Envelope>,
}

impl EventSink {
    pub(crate) fn new(subscription: u64, sender: async_channel::Sender<Envelope>) -> Self {
        Self {
            subscription,
            sender,
        }
    }

    /// Queue an event. Events emitted after the wallet shut down are dropped.
    pub fn emit(&self, event: ProviderEvent) {
        let envelope = Envelope {
            subscription: self.subscription,
            event,
        };
        if self.sender.try_send(envelope).is_err() {
            tracing::debug!(
                subscription = self.subscription,
                "event inbox closed, dropping provider event"
            );
        }
    }
}

/// Injected wallet provider (EIP-1193 style).
#[async_trait(?Send)]
pub trait Provider {
    /// Whether a provider object exists in the host environment.
    fn is_installed(&self) -> bool;

    /// `eth_requestAccounts`: prompts the user for account access.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderFault>;

    /// `eth_chainId`: hex id of the active chain.
    async fn chain_id(&self) -> Result<String, ProviderFault>;

    /// `eth_getBalance`: hex quantity in wei.
    async fn get_balance(&self, address: &str) -> Result<String, ProviderFault>;

    /// `wallet_switchEthereumChain`.
    async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderFault>;

    /// Start delivering `stream` events into `sink`.
    fn on(&self, stream: EventStream, sink: EventSink);

    /// Stop delivering `stream` events.
    fn remove_all_listeners(&self, stream: EventStream);
}

/// Source of the artificial delays in the demo transaction.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}
