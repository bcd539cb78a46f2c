//! # Provider Gateway
//!
//! Wraps the injected [`Provider`] and exposes the operations the wallet manager
//! needs, with provider errors normalized into [`WalletError`].
//!
//! ## Features
//! - Provider detection
//! - Account access and chain id lookup
//! - Best-effort balance queries (failures read as `"0"`)
//! - Simulated two-phase demo transaction (nothing is sent to any network)
//! - Event subscription bookkeeping
//! - Network switch requests
//!
//! ## Architecture
//!
//! ```text
//! WalletManager → ProviderGateway → Provider (window.ethereum / scripted)
//!                                 → Timer    (gloo-timers / tokio)
//! ```

use parking_lot::Mutex;
use shared::utils::{format_ether, parse_quantity, truncate_address};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::WalletConfig;
use crate::error::{ProviderFault, Result, WalletError};
use crate::network;
use crate::provider::{EventSink, EventStream, Provider, Timer};

const NO_ACCOUNTS_MESSAGE: &str = "No accounts found. Please unlock your wallet.";

/// Account access granted by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionGrant {
    pub address: String,
    pub chain_id: String,
}

/// Final status of a demo transaction. Simulated receipts always succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
}

/// Confirmation of a demo transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReceipt {
    pub hash: String,
    pub status: ReceiptStatus,
}

/// A broadcast demo transaction awaiting confirmation.
pub struct DemoTransaction<'a, P, T> {
    gateway: &'a ProviderGateway<P, T>,
    hash: String,
}

impl<'a, P: Provider, T: Timer> DemoTransaction<'a, P, T> {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Wait out the simulated confirmation delay.
    ///
    /// Fails with [`WalletError::NotConnected`] if the session ended meanwhile.
    pub async fn confirm(self) -> Result<DemoReceipt> {
        self.gateway
            .timer
            .sleep(self.gateway.config.confirmation_delay)
            .await;
        self.gateway.require_session()?;

        let receipt = DemoReceipt {
            hash: demo_hash(),
            status: ReceiptStatus::Success,
        };
        debug!(broadcast = %self.hash, confirmed = %receipt.hash, "demo transaction confirmed");
        Ok(receipt)
    }
}

/// Gateway over the injected wallet provider.
pub struct ProviderGateway<P, T> {
    provider: P,
    timer: T,
    config: WalletConfig,
    /// Address of the active session, if any
    session: Mutex<Option<String>>,
    /// Streams this gateway installed listeners for
    listening: Mutex<Vec<EventStream>>,
}

impl<P: Provider, T: Timer> ProviderGateway<P, T> {
    pub fn new(provider: P, timer: T, config: WalletConfig) -> Self {
        Self {
            provider,
            timer,
            config,
            session: Mutex::new(None),
            listening: Mutex::new(Vec::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Whether a wallet provider is present. Never fails.
    pub fn detect(&self) -> bool {
        self.provider.is_installed()
    }

    /// Prompt for account access and read the active chain.
    ///
    /// # Errors
    ///
    /// * `ProviderUnavailable` - no provider detected
    /// * `UserRejected` - the user declined the prompt
    /// * `RequestAlreadyPending` - a prompt is already open
    /// * `ProviderError` - anything else, including an empty account list
    #[instrument(skip(self))]
    pub async fn request_connection(&self) -> Result<ConnectionGrant> {
        if !self.detect() {
            return Err(WalletError::ProviderUnavailable);
        }

        let accounts = self
            .provider
            .request_accounts()
            .await
            .map_err(|fault| log_fault("eth_requestAccounts", fault).into_wallet_error())?;

        let address = accounts
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::ProviderError(NO_ACCOUNTS_MESSAGE.to_string()))?;

        let chain_id = self
            .provider
            .chain_id()
            .await
            .map_err(|fault| log_fault("eth_chainId", fault).into_wallet_error())?;

        info!(
            address = %truncate_address(&address),
            chain_id = %chain_id,
            "account access granted"
        );
        Ok(ConnectionGrant { address, chain_id })
    }

    /// Balance of `address` in ether. Any failure reads as `"0"`.
    #[instrument(skip(self, address))]
    pub async fn fetch_balance(&self, address: &str) -> String {
        if !self.detect() {
            return "0".to_string();
        }

        match self.provider.get_balance(address).await {
            Ok(quantity) => match parse_quantity(&quantity) {
                Some(wei) => format_ether(wei),
                None => {
                    warn!(quantity = %quantity, "unparseable balance quantity");
                    "0".to_string()
                }
            },
            Err(fault) => {
                warn!(error = %fault, "balance query failed");
                "0".to_string()
            }
        }
    }

    pub fn resolve_network_name(&self, chain_id: &str) -> String {
        network::name_for(chain_id)
    }

    /// Mark `address` as the active session.
    pub fn begin_session(&self, address: &str) {
        *self.session.lock() = Some(address.to_string());
    }

    pub fn end_session(&self) {
        self.session.lock().take();
    }

    pub fn has_session(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Address of the active session.
    fn require_session(&self) -> Result<String> {
        self.session.lock().clone().ok_or_else(|| {
            debug!("no active wallet session");
            WalletError::NotConnected
        })
    }

    /// Simulate signing and broadcasting a transaction.
    ///
    /// Nothing reaches the provider; the call only waits for the configured
    /// broadcast delay and returns a random hash.
    #[instrument(skip(self))]
    pub async fn submit_demo_transaction(
        &self,
        label: &str,
    ) -> Result<DemoTransaction<'_, P, T>> {
        self.require_session()?;
        self.timer.sleep(self.config.broadcast_delay).await;
        let account = self.require_session()?;

        let hash = demo_hash();
        debug!(
            account = %truncate_address(&account),
            hash = %hash,
            "demo transaction broadcast"
        );
        Ok(DemoTransaction {
            gateway: self,
            hash,
        })
    }

    pub fn subscribe_accounts(&self, sink: EventSink) {
        self.subscribe(EventStream::AccountsChanged, sink);
    }

    pub fn subscribe_network(&self, sink: EventSink) {
        self.subscribe(EventStream::ChainChanged, sink);
    }

    fn subscribe(&self, stream: EventStream, sink: EventSink) {
        if !self.detect() {
            debug!(event = stream.event_name(), "no provider, skipping subscription");
            return;
        }

        {
            let mut listening = self.listening.lock();
            if !listening.contains(&stream) {
                listening.push(stream);
            }
        }
        self.provider.on(stream, sink);
    }

    /// Remove every listener this gateway installed. No-op when there are none.
    pub fn unsubscribe_all(&self) {
        let streams = std::mem::take(&mut *self.listening.lock());
        if streams.is_empty() {
            return;
        }

        debug!(count = streams.len(), "removing wallet event listeners");
        for stream in streams {
            self.provider.remove_all_listeners(stream);
        }
    }

    /// Ask the provider to switch to `chain_id`. Failures keep the provider's message.
    #[instrument(skip(self))]
    pub async fn request_network_switch(&self, chain_id: &str) -> Result<()> {
        if !self.detect() {
            return Err(WalletError::ProviderUnavailable);
        }

        self.provider
            .switch_chain(chain_id)
            .await
            .map_err(|fault| log_fault("wallet_switchEthereumChain", fault).into_passthrough())
    }
}

fn log_fault(method: &str, fault: ProviderFault) -> ProviderFault {
    warn!(method, error = %fault, "provider request failed");
    fault
}

/// Random 32-byte hex hash with a `0x` prefix.
fn demo_hash() -> String {
    format!("0x{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
