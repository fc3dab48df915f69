//! Settings to adapters

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use keyrot_config::{AsanaSettings, AwsSettings, Settings};
use keyrot_engine::{RotationJob, SecretStore};
use keyrot_providers::aws::{
    AwsConfig, IamIdentityProvider, SnsSummaryPublisher, SsmSecretStore, load_sdk_config,
};
use keyrot_providers::{AsanaConfig, AsanaTaskClient, OpsNotifier, RetryPolicy};

pub fn aws_config(settings: &AwsSettings) -> AwsConfig {
    AwsConfig {
        region: settings.region.clone(),
        endpoint_url: settings.endpoint_url.clone(),
    }
}

pub fn asana_config(settings: &AsanaSettings) -> AsanaConfig {
    AsanaConfig {
        base_url: settings.base_url.clone(),
        workspace_id: settings.workspace_id.clone(),
        token_parameter: settings.token_parameter.clone(),
        due_in_days: settings.due_in_days,
        timeout: Duration::from_secs(settings.timeout_secs),
        ssm_region: settings.ssm_region.clone(),
        retry: RetryPolicy {
            max_retries: settings.max_retries,
            ..RetryPolicy::default()
        },
    }
}

/// Build the job against IAM, SSM, SNS and Asana
pub async fn build_job(settings: &Settings) -> Result<RotationJob> {
    let policy = settings.policy.to_policy()?;
    let sdk_config = load_sdk_config(&aws_config(&settings.aws)).await;

    let secrets: Arc<dyn SecretStore> = Arc::new(SsmSecretStore::new(&sdk_config));
    let tasks = AsanaTaskClient::new(asana_config(&settings.asana), Arc::clone(&secrets))
        .context("failed to set up the Asana client")?;
    let notifier = OpsNotifier::new(
        SnsSummaryPublisher::new(&sdk_config, settings.aws.topic_arn.clone()),
        Arc::new(tasks),
    );

    RotationJob::builder()
        .identity_provider(Arc::new(IamIdentityProvider::new(&sdk_config)))
        .secret_store(secrets)
        .notifier(Arc::new(notifier))
        .policy(policy)
        .build()
        .context("failed to assemble the rotation job")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn asana_settings_map_onto_client_config() {
        let settings = AsanaSettings {
            workspace_id: "551227202539".into(),
            timeout_secs: 4,
            max_retries: 1,
            ..AsanaSettings::default()
        };

        let config = asana_config(&settings);

        assert_eq!(config.workspace_id, "551227202539");
        assert_eq!(config.timeout, Duration::from_secs(4));
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.base_delay_ms, RetryPolicy::default().base_delay_ms);
        assert_eq!(config.token_parameter, "/data/credentials/asana_api_key");
    }

    #[test]
    fn aws_settings_keep_overrides() {
        let settings = AwsSettings {
            region: Some("eu-west-1".into()),
            endpoint_url: Some("http://localhost:4566".into()),
            topic_arn: "arn:aws:sns:eu-west-1:123456789012:ops".into(),
        };
        assert_eq!(
            aws_config(&settings),
            AwsConfig {
                region: Some("eu-west-1".into()),
                endpoint_url: Some("http://localhost:4566".into()),
            }
        );
    }
}
