use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use tokio::sync::Notify;

/// Cloneable stop flag shared between the frame loop and whoever asks it to stop.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    signal: Arc<Notify>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutdown(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        // notify_one stores a permit, so a waiter that arrives late still wakes
        self.signal.notify_one();
        self.signal.notify_waiters();
    }

    pub fn is_shutdown(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    pub async fn wait_for_shutdown(&self) {
        if self.is_shutdown() {
            return;
        }
        self.signal.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn waiter_wakes_on_shutdown() {
        let signal = ShutdownSignal::new();
        let waiter = signal.clone();
        let handle = tokio::spawn(async move { waiter.wait_for_shutdown().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
        assert!(signal.is_shutdown());
    }

    #[tokio::test]
    async fn late_waiter_returns_immediately() {
        let signal = ShutdownSignal::new();
        signal.shutdown();

        tokio::time::timeout(Duration::from_secs(1), signal.clone().wait_for_shutdown()).await.unwrap();
    }
}
