//! EIP-1193 Provider Binding via wasm-bindgen
//!
//! Exposes the injected `window.ethereum` object as a [`lib_wallet::Provider`].
//! Rejections keep the provider's numeric `code` so the wallet library can
//! tell a user rejection from a pending prompt.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use js_sys::Reflect;
use lib_wallet::{EventSink, EventStream, Provider, ProviderEvent, ProviderFault};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// ============================================================================
// PROVIDER ACCESS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
function injected() {
    if (typeof window === 'undefined' || !window.ethereum) {
        return null;
    }
    return window.ethereum;
}

export function hasEthereum() {
    return injected() !== null;
}

export async function ethRequest(method, params) {
    const provider = injected();
    if (!provider) {
        throw { code: null, message: 'Wallet provider not found' };
    }
    if (params === undefined || params === null) {
        return await provider.request({ method });
    }
    return await provider.request({ method, params });
}

export function ethOn(event, callback) {
    const provider = injected();
    if (provider && typeof provider.on === 'function') {
        provider.on(event, callback);
    }
}

export function ethRemoveAllListeners(event) {
    const provider = injected();
    if (provider && typeof provider.removeAllListeners === 'function') {
        provider.removeAllListeners(event);
    }
}
")]
extern "C" {
    fn hasEthereum() -> bool;

    #[wasm_bindgen(catch)]
    async fn ethRequest(method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    fn ethOn(event: &str, callback: &js_sys::Function);

    fn ethRemoveAllListeners(event: &str);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchChainParams<'a> {
    chain_id: &'a str,
}

/// Decode a rejected provider request into its code and message.
fn fault_from_js(error: &JsValue) -> ProviderFault {
    let code = Reflect::get(error, &JsValue::from_str("code"))
        .ok()
        .and_then(|value| value.as_f64())
        .map(|code| code as i64);

    let message = Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|value| value.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("Provider error: {:?}", error));

    ProviderFault::new(code, message)
}

fn decode_error(method: &str, error: serde_wasm_bindgen::Error) -> ProviderFault {
    ProviderFault::new(None, format!("Unexpected {} response: {}", method, error))
}

async fn request(method: &str, params: JsValue) -> Result<JsValue, ProviderFault> {
    ethRequest(method, params)
        .await
        .map_err(|error| fault_from_js(&error))
}

// ============================================================================
// BROWSER PROVIDER
// ============================================================================

type Listener = Closure<dyn FnMut(JsValue)>;

/// [`Provider`] over `window.ethereum`.
///
/// Keeps each installed listener closure alive until its stream is removed.
#[derive(Default)]
pub struct BrowserProvider {
    listeners: RefCell<HashMap<EventStream, Listener>>,
}

impl BrowserProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn listener(stream: EventStream, sink: EventSink) -> Listener {
        match stream {
            EventStream::AccountsChanged => Closure::new(move |value: JsValue| {
                match serde_wasm_bindgen::from_value::<Vec<String>>(value) {
                    Ok(accounts) => sink.emit(ProviderEvent::AccountsChanged(accounts)),
                    Err(e) => log::warn!("Ignoring malformed accountsChanged payload: {}", e),
                }
            }),
            EventStream::ChainChanged => {
                Closure::new(move |value: JsValue| match value.as_string() {
                    Some(chain_id) => sink.emit(ProviderEvent::ChainChanged(chain_id)),
                    None => log::warn!("Ignoring non-string chainChanged payload"),
                })
            }
        }
    }
}

#[async_trait(?Send)]
impl Provider for BrowserProvider {
    fn is_installed(&self) -> bool {
        hasEthereum()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderFault> {
        let accounts = request("eth_requestAccounts", JsValue::UNDEFINED).await?;
        serde_wasm_bindgen::from_value(accounts).map_err(|e| decode_error("eth_requestAccounts", e))
    }

    async fn chain_id(&self) -> Result<String, ProviderFault> {
        request("eth_chainId", JsValue::UNDEFINED)
            .await?
            .as_string()
            .ok_or_else(|| ProviderFault::new(None, "Unexpected eth_chainId response"))
    }

    async fn get_balance(&self, address: &str) -> Result<String, ProviderFault> {
        let params = serde_wasm_bindgen::to_value(&[address, "latest"])
            .map_err(|e| decode_error("eth_getBalance", e))?;
        request("eth_getBalance", params)
            .await?
            .as_string()
            .ok_or_else(|| ProviderFault::new(None, "Unexpected eth_getBalance response"))
    }

    async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderFault> {
        let params = serde_wasm_bindgen::to_value(&[SwitchChainParams { chain_id }])
            .map_err(|e| decode_error("wallet_switchEthereumChain", e))?;
        request("wallet_switchEthereumChain", params).await?;
        Ok(())
    }

    fn on(&self, stream: EventStream, sink: EventSink) {
        let listener = Self::listener(stream, sink);
        ethOn(stream.event_name(), listener.as_ref().unchecked_ref());
        self.listeners.borrow_mut().insert(stream, listener);
    }

    fn remove_all_listeners(&self, stream: EventStream) {
        ethRemoveAllListeners(stream.event_name());
        self.listeners.borrow_mut().remove(&stream);
    }
}
