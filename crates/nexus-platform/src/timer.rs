//! Timer adapter backed by `setTimeout`.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

use nexus_core::ports::TimerPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl BrowserTimer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl TimerPort for BrowserTimer {
    async fn sleep(&self, ms: u64) {
        // setTimeout takes a 32-bit delay
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
