//! SNS summary publisher

use async_trait::async_trait;
use aws_sdk_sns::Client;
use keyrot_engine::GatewayResult;

use super::sdk_error;
use crate::notifier::SummaryPublisher;

/// Publishes the run summary to an SNS topic
#[derive(Debug, Clone)]
pub struct SnsSummaryPublisher {
    client: Client,
    topic_arn: String,
}

impl SnsSummaryPublisher {
    #[must_use]
    pub fn new(sdk_config: &aws_config::SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self {
            client: Client::new(sdk_config),
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl SummaryPublisher for SnsSummaryPublisher {
    #[tracing::instrument(skip(self, body), fields(provider = "SNS", topic = %self.topic_arn))]
    async fn publish(&self, subject: &str, body: &str) -> GatewayResult<()> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| sdk_error("Publish", &e))?;

        tracing::info!(message_id = output.message_id(), "published summary");
        Ok(())
    }
}
