//! # Wallet Error Handling
//!
//! This module defines [`WalletError`], the only error vocabulary visible above
//! the provider gateway, and [`ProviderFault`], the raw error a provider reports.
//!
//! ## Error Categories
//!
//! | Variant | `code()` | Meaning |
//! |---------|----------|---------|
//! | [`ProviderUnavailable`](WalletError::ProviderUnavailable) | `ProviderUnavailable` | No injected wallet was detected |
//! | [`UserRejected`](WalletError::UserRejected) | `UserRejected` | The user declined the prompt |
//! | [`RequestAlreadyPending`](WalletError::RequestAlreadyPending) | `RequestAlreadyPending` | A prompt is already open in the wallet |
//! | [`ProviderError`](WalletError::ProviderError) | `ProviderError` | Any other provider failure, message passed through |
//! | [`NotConnected`](WalletError::NotConnected) | `NotConnected` | A command needed a session that does not exist |
//!
//! ## Error Conversion
//!
//! Provider error codes are matched exactly once, in
//! [`crate::gateway::ProviderGateway`], through [`ProviderFault::into_wallet_error`].
//!
//! ```rust
//! use lib_wallet::error::{ProviderFault, WalletError, USER_REJECTED_CODE};
//!
//! let fault = ProviderFault::new(Some(USER_REJECTED_CODE), "User denied account authorization");
//! assert_eq!(fault.into_wallet_error(), WalletError::UserRejected);
//! ```

use std::fmt;
use thiserror::Error;

/// Provider code for "user rejected the request" (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;

/// Provider code for "a request of this type is already pending".
pub const REQUEST_PENDING_CODE: i64 = -32002;

/// Convenience type alias for `Result<T, WalletError>`.
pub type Result<T> = std::result::Result<T, WalletError>;

/// Error taxonomy for every wallet command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet provider is injected into the page.
    ///
    /// Terminal for the attempt: the user has to install or enable a wallet.
    #[error("Wallet provider not found. Please install MetaMask to continue.")]
    ProviderUnavailable,

    /// The user declined the prompt. They may retry.
    #[error("User rejected the connection request")]
    UserRejected,

    /// The provider suppressed a duplicate prompt. The user has to resolve the
    /// open prompt first.
    #[error("Connection request already pending. Check your wallet.")]
    RequestAlreadyPending,

    /// Opaque provider failure, message passed through.
    #[error("{0}")]
    ProviderError(String),

    /// A command ran without an active session.
    #[error("Wallet not connected")]
    NotConnected,
}

impl WalletError {
    /// Short stable identifier, used as the `code` field at the JS boundary.
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::ProviderUnavailable => "ProviderUnavailable",
            WalletError::UserRejected => "UserRejected",
            WalletError::RequestAlreadyPending => "RequestAlreadyPending",
            WalletError::ProviderError(_) => "ProviderError",
            WalletError::NotConnected => "NotConnected",
        }
    }
}

/// Raw error reported by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFault {
    /// Provider-defined numeric code, when one was reported
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderFault {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Maps well-known codes onto the taxonomy; everything else becomes
    /// [`WalletError::ProviderError`].
    pub fn into_wallet_error(self) -> WalletError {
        match self.code {
            Some(USER_REJECTED_CODE) => WalletError::UserRejected,
            Some(REQUEST_PENDING_CODE) => WalletError::RequestAlreadyPending,
            _ => WalletError::ProviderError(self.message),
        }
    }

    /// Keeps the provider message verbatim regardless of code.
    pub fn into_passthrough(self) -> WalletError {
        WalletError::ProviderError(self.message)
    }
}

impl fmt::Display for ProviderFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "provider error {}: {}", code, self.message),
            None => write!(f, "provider error: {}", self.message),
        }
    }
}

impl std::error::Error for ProviderFault {}
