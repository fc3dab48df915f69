//! Operations notifier
//!
//! Owner tasks and the run summary go to different systems; [`OpsNotifier`]
//! puts them behind the single [`Notifier`] the job expects.

use std::sync::Arc;

use async_trait::async_trait;
use keyrot_engine::{GatewayResult, Notifier, TaskReceipt};

use crate::asana::AsanaTaskClient;

/// Destination for the run summary (a pub/sub topic)
#[async_trait]
pub trait SummaryPublisher: Send + Sync {
    async fn publish(&self, subject: &str, body: &str) -> GatewayResult<()>;
}

/// [`Notifier`] composed of a summary publisher and the Asana client
#[derive(Debug)]
pub struct OpsNotifier<P> {
    summary: P,
    tasks: Arc<AsanaTaskClient>,
}

impl<P: SummaryPublisher> OpsNotifier<P> {
    pub fn new(summary: P, tasks: Arc<AsanaTaskClient>) -> Self {
        Self { summary, tasks }
    }
}

#[async_trait]
impl<P: SummaryPublisher> Notifier for OpsNotifier<P> {
    async fn create_task(
        &self,
        user_name: &str,
        secret_path: &str,
        assignee: &str,
    ) -> GatewayResult<TaskReceipt> {
        self.tasks.create_task(user_name, secret_path, assignee).await
    }

    async fn publish_summary(&self, subject: &str, body: &str) -> GatewayResult<()> {
        self.summary.publish(subject, body).await
    }
}
