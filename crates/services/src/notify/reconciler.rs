use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use super::DeviceTokenStore;
use crate::push::DeliveryOutcome;

/// Deregisters permanently-dead tokens after a multicast. Cleanups are
/// independent: they run concurrently and an individual failure never
/// blocks the rest.
pub struct FailureReconciler {
    tokens: Arc<dyn DeviceTokenStore>,
}

impl FailureReconciler {
    pub fn new(tokens: Arc<dyn DeviceTokenStore>) -> Self {
        Self { tokens }
    }

    /// Returns the number of registrations removed. Outcomes with a
    /// transient (or no) failure are left untouched.
    pub async fn reconcile(&self, outcomes: &[DeliveryOutcome]) -> u64 {
        let cleanups = outcomes
            .iter()
            .filter(|outcome| outcome.is_permanent_failure())
            .map(|outcome| {
                let store = Arc::clone(&self.tokens);
                let token = outcome.token.clone();
                let failure = outcome.error;
                async move {
                    match store.delete_by_token(&token).await {
                        Ok(removed) => {
                            if removed > 0 {
                                info!(?failure, removed, "Deregistered dead device token");
                            }
                            removed
                        }
                        Err(err) => {
                            warn!(?failure, error = %err, "Device token cleanup failed");
                            0
                        }
                    }
                }
            });

        join_all(cleanups).await.into_iter().sum()
    }
}
