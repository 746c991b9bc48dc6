use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Published when automatic renewal is requested for a user's plan.
/// Charging the stored token is the business of whatever listens on the
/// bus; this module only announces the request.
#[derive(Debug, Clone, Serialize)]
pub struct AccountRenewalEvent {
    pub user_id: Uuid,
    pub user_plan_id: Uuid,
    pub pricing_id: Option<Uuid>,
    pub payment_provider: Option<String>,
    pub token: String,
    pub occurred_at: DateTime<Utc>,
}

#[automock]
pub trait RenewalPublisher: Send + Sync {
    fn publish(&self, event: AccountRenewalEvent) -> Result<()>;
}

#[async_trait]
pub trait RenewalListener: Send + Sync {
    async fn on_renewal(&self, event: &AccountRenewalEvent) -> Result<()>;
    fn listener_name(&self) -> &'static str;
}

/// Fans renewal events out to registered listeners from a spawned task.
/// A failing listener is logged and skipped; it never blocks the others.
#[derive(Clone)]
pub struct RenewalEventBus {
    tx: mpsc::Sender<AccountRenewalEvent>,
}

impl RenewalEventBus {
    pub fn new(listeners: Vec<Arc<dyn RenewalListener>>) -> Self {
        let (tx, mut rx) = mpsc::channel::<AccountRenewalEvent>(256);

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                for listener in &listeners {
                    if let Err(error) = listener.on_renewal(&event).await {
                        warn!(
                            listener = listener.listener_name(),
                            error = %error,
                            "Renewal listener failed"
                        );
                    }
                }
            }
        });

        Self { tx }
    }
}

impl RenewalPublisher for RenewalEventBus {
    fn publish(&self, event: AccountRenewalEvent) -> Result<()> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(anyhow!("renewal queue is full")),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(anyhow!("renewal queue is closed")),
        }
    }
}

/// Listener that only records the request in the log stream. The payment
/// worker that actually charges tokens registers its own listener.
pub struct TracingRenewalListener;

#[async_trait]
impl RenewalListener for TracingRenewalListener {
    async fn on_renewal(&self, event: &AccountRenewalEvent) -> Result<()> {
        info!(
            user_id = %event.user_id,
            user_plan_id = %event.user_plan_id,
            payment_provider = ?event.payment_provider,
            "renewal: automatic renewal event published"
        );
        Ok(())
    }

    fn listener_name(&self) -> &'static str {
        "tracing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ForwardingListener {
        tx: mpsc::Sender<AccountRenewalEvent>,
    }

    #[async_trait]
    impl RenewalListener for ForwardingListener {
        async fn on_renewal(&self, event: &AccountRenewalEvent) -> Result<()> {
            self.tx
                .send(event.clone())
                .await
                .map_err(|_| anyhow!("receiver dropped"))
        }

        fn listener_name(&self) -> &'static str {
            "forwarding"
        }
    }

    struct FailingListener;

    #[async_trait]
    impl RenewalListener for FailingListener {
        async fn on_renewal(&self, _event: &AccountRenewalEvent) -> Result<()> {
            Err(anyhow!("boom"))
        }

        fn listener_name(&self) -> &'static str {
            "failing"
        }
    }

    fn sample_event(user_id: Uuid) -> AccountRenewalEvent {
        AccountRenewalEvent {
            user_id,
            user_plan_id: Uuid::new_v4(),
            pricing_id: None,
            payment_provider: Some("stripe".to_string()),
            token: "tok_123".to_string(),
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn delivers_events_to_registered_listeners() {
        let (tx, mut rx) = mpsc::channel(8);
        let bus = RenewalEventBus::new(vec![Arc::new(ForwardingListener { tx })]);

        let user_id = Uuid::new_v4();
        bus.publish(sample_event(user_id)).unwrap();

        let received = rx.recv().await.expect("event should arrive");
        assert_eq!(received.user_id, user_id);
    }

    #[tokio::test]
    async fn a_failing_listener_does_not_stop_delivery() {
        let (tx, mut rx) = mpsc::channel(8);
        let bus = RenewalEventBus::new(vec![
            Arc::new(FailingListener),
            Arc::new(ForwardingListener { tx }),
        ]);

        bus.publish(sample_event(Uuid::new_v4())).unwrap();
        let first = rx.recv().await;
        assert!(first.is_some());

        bus.publish(sample_event(Uuid::new_v4())).unwrap();
        let second = rx.recv().await;
        assert!(second.is_some());
    }
}
