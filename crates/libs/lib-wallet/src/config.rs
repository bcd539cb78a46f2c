//! # Wallet Configuration
//!
//! Timing and wording of the simulated demo transaction.
//!
//! Values come from [`WalletConfig::default`] or from environment variables via
//! [`WalletConfig::from_env`]. In the browser there is no process environment,
//! so `from_env` yields the defaults there.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `WALLET_DEMO_BROADCAST_MS` | 2000 |
//! | `WALLET_DEMO_CONFIRM_MS` | 3000 |

use std::env;
use std::time::Duration;

/// Longest delay either demo phase may be configured with.
pub const MAX_DEMO_DELAY: Duration = Duration::from_secs(60);

pub const DEFAULT_BROADCAST_DELAY_MS: u64 = 2000;
pub const DEFAULT_CONFIRMATION_DELAY_MS: u64 = 3000;
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Transaction Simulated Successfully!";

const BROADCAST_ENV: &str = "WALLET_DEMO_BROADCAST_MS";
const CONFIRM_ENV: &str = "WALLET_DEMO_CONFIRM_MS";

/// Configuration for the wallet manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletConfig {
    /// Simulated time between the signature prompt and broadcast
    pub broadcast_delay: Duration,

    /// Simulated time between broadcast and confirmation
    pub confirmation_delay: Duration,

    /// Result message recorded when the demo transaction confirms
    pub success_message: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            broadcast_delay: Duration::from_millis(DEFAULT_BROADCAST_DELAY_MS),
            confirmation_delay: Duration::from_millis(DEFAULT_CONFIRMATION_DELAY_MS),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl WalletConfig {
    /// Load configuration from environment variables, defaulting anything unset.
    pub fn from_env() -> Result<Self, String> {
        let broadcast_delay = delay_from_env(BROADCAST_ENV, DEFAULT_BROADCAST_DELAY_MS)?;
        let confirmation_delay = delay_from_env(CONFIRM_ENV, DEFAULT_CONFIRMATION_DELAY_MS)?;

        Ok(Self {
            broadcast_delay,
            confirmation_delay,
            ..Self::default()
        })
    }

    /// Same delays for both phases; handy for tests and previews.
    pub fn with_delays(broadcast_delay: Duration, confirmation_delay: Duration) -> Self {
        Self {
            broadcast_delay,
            confirmation_delay,
            ..Self::default()
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.broadcast_delay > MAX_DEMO_DELAY {
            return Err(format!(
                "broadcast delay must be at most {}s",
                MAX_DEMO_DELAY.as_secs()
            ));
        }

        if self.confirmation_delay > MAX_DEMO_DELAY {
            return Err(format!(
                "confirmation delay must be at most {}s",
                MAX_DEMO_DELAY.as_secs()
            ));
        }

        if self.success_message.trim().is_empty() {
            return Err("success message must not be empty".to_string());
        }

        Ok(())
    }
}

fn delay_from_env(name: &str, default_ms: u64) -> Result<Duration, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| format!("{} must be a whole number of milliseconds: {}", name, e)),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}
