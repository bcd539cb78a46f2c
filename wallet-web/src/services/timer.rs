//! Browser timer for the demo transaction delays

use async_trait::async_trait;
use lib_wallet::Timer;
use std::time::Duration;

/// [`Timer`] backed by `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
