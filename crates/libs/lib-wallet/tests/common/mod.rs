//! Scripted provider, timer and observer shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lib_wallet::error::ProviderFault;
use lib_wallet::{
    EventSink, EventStream, Provider, ProviderEvent, Timer, WalletConfig, WalletManager,
    WalletObserver,
};
use shared::dto::wallet::{TransactionPhase, WalletSnapshot};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

pub const ADDRESS: &str = "0xabcd00000000000000000000000000000000ef12";
pub const MAINNET: &str = "0x1";
/// 1.5 ether in wei
pub const BALANCE_WEI: &str = "0x14d1120d7b160000";

pub type TestManager = WalletManager<MockProvider, TestTimer, RecordingObserver>;

// ========== Provider ==========

pub struct MockProvider {
    installed: bool,
    accounts: RefCell<Result<Vec<String>, ProviderFault>>,
    chain: RefCell<String>,
    balance: RefCell<Result<String, ProviderFault>>,
    switch_result: RefCell<Result<(), ProviderFault>>,
    gate: Option<async_channel::Receiver<()>>,
    sinks: RefCell<HashMap<EventStream, EventSink>>,
    pub account_requests: Cell<usize>,
    pub switch_requests: RefCell<Vec<String>>,
    pub removals: RefCell<Vec<EventStream>>,
}

impl MockProvider {
    pub fn connected_to(address: &str, chain_id: &str) -> Self {
        Self {
            installed: true,
            accounts: RefCell::new(Ok(vec![address.to_string()])),
            chain: RefCell::new(chain_id.to_string()),
            balance: RefCell::new(Ok(BALANCE_WEI.to_string())),
            switch_result: RefCell::new(Ok(())),
            gate: None,
            sinks: RefCell::new(HashMap::new()),
            account_requests: Cell::new(0),
            switch_requests: RefCell::new(Vec::new()),
            removals: RefCell::new(Vec::new()),
        }
    }

    pub fn missing() -> Self {
        Self {
            installed: false,
            ..Self::connected_to(ADDRESS, MAINNET)
        }
    }

    pub fn rejecting(code: i64, message: &str) -> Self {
        let provider = Self::connected_to(ADDRESS, MAINNET);
        *provider.accounts.borrow_mut() = Err(ProviderFault::new(Some(code), message));
        provider
    }

    /// Hold every account request until a message arrives on `gate`.
    pub fn gated(mut self, gate: async_channel::Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn failing_balance(self) -> Self {
        *self.balance.borrow_mut() = Err(ProviderFault::new(Some(-32603), "header not found"));
        self
    }

    pub fn failing_switch(self, code: i64, message: &str) -> Self {
        *self.switch_result.borrow_mut() = Err(ProviderFault::new(Some(code), message));
        self
    }

    /// Make later account requests succeed with `accounts`.
    pub fn grant(&self, accounts: &[&str]) {
        *self.accounts.borrow_mut() = Ok(accounts.iter().map(|a| a.to_string()).collect());
    }

    pub fn is_listening(&self, stream: EventStream) -> bool {
        self.sinks.borrow().contains_key(&stream)
    }

    /// Push an event the way the wallet extension would.
    pub fn emit(&self, event: ProviderEvent) {
        let stream = match &event {
            ProviderEvent::AccountsChanged(_) => EventStream::AccountsChanged,
            ProviderEvent::ChainChanged(_) => EventStream::ChainChanged,
        };
        if let Some(sink) = self.sinks.borrow().get(&stream) {
            sink.emit(event);
        }
    }
}

#[async_trait(?Send)]
impl Provider for MockProvider {
    fn is_installed(&self) -> bool {
        self.installed
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderFault> {
        self.account_requests.set(self.account_requests.get() + 1);
        if let Some(gate) = &self.gate {
            let _ = gate.recv().await;
        }
        self.accounts.borrow().clone()
    }

    async fn chain_id(&self) -> Result<String, ProviderFault> {
        Ok(self.chain.borrow().clone())
    }

    async fn get_balance(&self, _address: &str) -> Result<String, ProviderFault> {
        self.balance.borrow().clone()
    }

    async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderFault> {
        self.switch_requests.borrow_mut().push(chain_id.to_string());
        self.switch_result.borrow().clone()
    }

    fn on(&self, stream: EventStream, sink: EventSink) {
        self.sinks.borrow_mut().insert(stream, sink);
    }

    fn remove_all_listeners(&self, stream: EventStream) {
        self.sinks.borrow_mut().remove(&stream);
        self.removals.borrow_mut().push(stream);
    }
}

// ========== Timer ==========

/// Returns immediately, or waits for one message per sleep when gated.
pub struct TestTimer {
    gate: Option<async_channel::Receiver<()>>,
}

impl TestTimer {
    pub fn instant() -> Self {
        Self { gate: None }
    }

    pub fn gated(gate: async_channel::Receiver<()>) -> Self {
        Self { gate: Some(gate) }
    }
}

#[async_trait(?Send)]
impl Timer for TestTimer {
    async fn sleep(&self, _duration: Duration) {
        match &self.gate {
            Some(gate) => {
                let _ = gate.recv().await;
            }
            None => tokio::task::yield_now().await,
        }
    }
}

// ========== Observer ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ConnectSucceeded { address: String, network: String },
    ConnectFailed(String),
    Phase(TransactionPhase, Option<String>),
    NetworkChanged(String),
    Disconnected,
}

#[derive(Default)]
pub struct RecordingObserver {
    pub notices: RefCell<Vec<Notice>>,
    pub snapshots: RefCell<Vec<WalletSnapshot>>,
}

impl RecordingObserver {
    pub fn phases(&self) -> Vec<TransactionPhase> {
        self.notices
            .borrow()
            .iter()
            .filter_map(|notice| match notice {
                Notice::Phase(phase, _) => Some(*phase),
                _ => None,
            })
            .collect()
    }
}

impl WalletObserver for RecordingObserver {
    fn on_connect_succeeded(&self, address: &str, network: &str) {
        self.notices.borrow_mut().push(Notice::ConnectSucceeded {
            address: address.to_string(),
            network: network.to_string(),
        });
    }

    fn on_connect_failed(&self, message: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::ConnectFailed(message.to_string()));
    }

    fn on_transaction_phase_changed(&self, phase: TransactionPhase, detail: Option<&str>) {
        self.notices
            .borrow_mut()
            .push(Notice::Phase(phase, detail.map(str::to_string)));
    }

    fn on_network_changed(&self, name: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::NetworkChanged(name.to_string()));
    }

    fn on_disconnected(&self) {
        self.notices.borrow_mut().push(Notice::Disconnected);
    }

    fn on_state_changed(&self, snapshot: &WalletSnapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}

// ========== Builders ==========

pub fn manager_with(provider: MockProvider, timer: TestTimer) -> TestManager {
    WalletManager::new(
        provider,
        timer,
        RecordingObserver::default(),
        WalletConfig::with_delays(Duration::from_millis(20), Duration::from_millis(30)),
    )
}

pub fn manager(provider: MockProvider) -> TestManager {
    manager_with(provider, TestTimer::instant())
}

pub fn provider(manager: &TestManager) -> &MockProvider {
    manager.gateway().provider()
}
