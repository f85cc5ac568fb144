//! Application State

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::responder::Responder;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Turns a visitor's query into reply text
    pub responder: Arc<dyn Responder>,

    /// Last known responder reachability, served by `/health`
    pub health: HealthStatus,
}

/// Cached result of the responder's health check.
///
/// `/health` reads this instead of calling the responder, so it answers
/// immediately even while the model server is slow or down.
#[derive(Clone, Debug, Default)]
pub struct HealthStatus(Arc<AtomicBool>);

impl HealthStatus {
    pub fn new(connected: bool) -> Self {
        Self(Arc::new(AtomicBool::new(connected)))
    }

    pub fn is_connected(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Run one check bounded by `limit` and record the result
    pub async fn refresh(&self, responder: &dyn Responder, limit: Duration) -> bool {
        let connected = tokio::time::timeout(limit, responder.health_check())
            .await
            .unwrap_or_else(|_| {
                tracing::warn!("Responder health check timed out after {:?}", limit);
                false
            });

        let previous = self.0.swap(connected, Ordering::Relaxed);
        if previous != connected {
            tracing::info!(connected, "Responder health changed");
        }
        connected
    }

    /// Refresh every `interval` for the life of the runtime
    pub fn spawn_monitor(&self, responder: Arc<dyn Responder>, interval: Duration, limit: Duration) -> JoinHandle<()> {
        let status = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; startup has just checked
            ticker.tick().await;
            loop {
                ticker.tick().await;
                status.refresh(responder.as_ref(), limit).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::Result;

    struct Reachable(bool);

    #[async_trait]
    impl Responder for Reachable {
        async fn respond(&self, _session_id: &str, _query: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn health_check(&self) -> bool {
            self.0
        }
    }

    struct Stalled;

    #[async_trait]
    impl Responder for Stalled {
        async fn respond(&self, _session_id: &str, _query: &str) -> Result<Option<String>> {
            std::future::pending().await
        }

        async fn health_check(&self) -> bool {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_refresh_records_result() {
        let status = HealthStatus::default();
        assert!(status.refresh(&Reachable(true), Duration::from_secs(1)).await);
        assert!(status.is_connected());

        assert!(!status.refresh(&Reachable(false), Duration::from_secs(1)).await);
        assert!(!status.is_connected());
    }

    #[tokio::test]
    async fn test_stalled_check_is_bounded() {
        let status = HealthStatus::new(true);
        let checked = tokio::time::timeout(
            Duration::from_secs(1),
            status.refresh(&Stalled, Duration::from_millis(20)),
        )
        .await;

        assert_eq!(checked.ok(), Some(false));
        assert!(!status.is_connected());
    }

    #[tokio::test]
    async fn test_monitor_refreshes_in_background() {
        let status = HealthStatus::new(false);
        let monitor = status.spawn_monitor(
            Arc::new(Reachable(true)),
            Duration::from_millis(10),
            Duration::from_secs(1),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        monitor.abort();
        assert!(status.is_connected());
    }
}
