//! Browser Wallet Binding
//!
//! Wires the wallet library to `window.ethereum` and exports a
//! [`WalletHandle`] class for the storefront page.
//!
//! ```js
//! import init, { WalletHandle } from './wallet_web.js';
//!
//! await init();
//! const wallet = new WalletHandle((notice) => showToast(notice));
//! await wallet.connect();
//! await wallet.submitDemoTransaction();
//! ```

use std::rc::Rc;
use std::time::Duration;

use js_sys::{Function, Promise};
use lib_wallet::{network, CommandOutcome, WalletConfig, WalletManager};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

mod services;
mod state;
mod utils;

use services::{BrowserProvider, GlooTimer};
use state::{CommandReport, JsObserver};
use utils::constants::DEFAULT_TRANSACTION_LABEL;

type BrowserWallet = WalletManager<BrowserProvider, GlooTimer, JsObserver>;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Wallet module loaded");
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkEntry {
    chain_id: &'static str,
    chain_number: u64,
    name: &'static str,
}

fn report(outcome: CommandOutcome) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CommandReport::from(outcome)).map_err(JsValue::from)
}

fn demo_config(broadcast_ms: Option<u32>, confirm_ms: Option<u32>) -> WalletConfig {
    let mut config = WalletConfig::from_env().unwrap_or_else(|e| {
        log::warn!("Ignoring wallet environment ({}), using defaults", e);
        WalletConfig::default()
    });
    if let Some(ms) = broadcast_ms {
        config.broadcast_delay = Duration::from_millis(u64::from(ms));
    }
    if let Some(ms) = confirm_ms {
        config.confirmation_delay = Duration::from_millis(u64::from(ms));
    }

    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("Invalid wallet configuration ({}), using defaults", e);
            WalletConfig::default()
        }
    }
}

/// Wallet connection handle exported to JavaScript.
#[wasm_bindgen]
pub struct WalletHandle {
    wallet: Rc<BrowserWallet>,
}

#[wasm_bindgen]
impl WalletHandle {
    /// `onNotice` receives `{ kind, ... }` objects; delays are in milliseconds.
    #[wasm_bindgen(constructor)]
    pub fn new(
        on_notice: Option<Function>,
        broadcast_ms: Option<u32>,
        confirm_ms: Option<u32>,
    ) -> WalletHandle {
        let wallet = Rc::new(WalletManager::new(
            BrowserProvider::new(),
            GlooTimer,
            JsObserver::new(on_notice),
            demo_config(broadcast_ms, confirm_ms),
        ));

        let events = Rc::clone(&wallet);
        spawn_local(async move {
            events.run_event_loop().await;
        });

        WalletHandle { wallet }
    }

    #[wasm_bindgen(js_name = isProviderInstalled)]
    pub fn is_provider_installed(&self) -> bool {
        self.wallet.is_provider_installed()
    }

    pub fn connect(&self) -> Promise {
        let wallet = Rc::clone(&self.wallet);
        future_to_promise(async move { report(wallet.connect().await) })
    }

    pub fn disconnect(&self) -> Result<JsValue, JsValue> {
        report(self.wallet.disconnect())
    }

    #[wasm_bindgen(js_name = submitDemoTransaction)]
    pub fn submit_demo_transaction(&self, label: Option<String>) -> Promise {
        let wallet = Rc::clone(&self.wallet);
        let label = label.unwrap_or_else(|| DEFAULT_TRANSACTION_LABEL.to_string());
        future_to_promise(async move { report(wallet.submit_demo_transaction(&label).await) })
    }

    #[wasm_bindgen(js_name = switchNetwork)]
    pub fn switch_network(&self, chain_id: String) -> Promise {
        let wallet = Rc::clone(&self.wallet);
        future_to_promise(async move { report(wallet.switch_network(&chain_id).await) })
    }

    /// Current wallet and transaction state.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.wallet.snapshot()).map_err(JsValue::from)
    }

    /// Networks with a known display name.
    pub fn networks() -> Result<JsValue, JsValue> {
        let entries: Vec<NetworkEntry> = network::all()
            .iter()
            .map(|descriptor| NetworkEntry {
                chain_id: descriptor.chain_id,
                chain_number: descriptor.chain_number,
                name: descriptor.display_name,
            })
            .collect();
        serde_wasm_bindgen::to_value(&entries).map_err(JsValue::from)
    }

    /// Remove provider listeners and stop processing provider events.
    pub fn shutdown(&self) {
        self.wallet.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_config_applies_overrides() {
        let config = demo_config(Some(250), None);
        assert_eq!(config.broadcast_delay, Duration::from_millis(250));
        assert_eq!(
            config.confirmation_delay,
            WalletConfig::default().confirmation_delay
        );
    }

    #[test]
    fn test_demo_config_falls_back_on_invalid_delay() {
        let config = demo_config(Some(120_000), Some(10));
        assert_eq!(config, WalletConfig::default());
    }
}
