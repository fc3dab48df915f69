//! AWS adapters
//!
//! IAM holds the keys, SSM Parameter Store holds the issued secrets and SNS
//! carries the run summary. All three clients share one SDK configuration.
//!
//! Credentials come from the default provider chain:
//! 1. Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
//! 2. Shared credentials file (`~/.aws/credentials`)
//! 3. IAM role (Lambda execution role, ECS task role, EC2 instance profile)

mod iam;
mod sns;
mod ssm;

use keyrot_engine::GatewayError;
use serde::{Deserialize, Serialize};

pub use iam::IamIdentityProvider;
pub use sns::SnsSummaryPublisher;
pub use ssm::SsmSecretStore;

/// Shared SDK settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS region (auto-detected from the environment if `None`)
    pub region: Option<String>,

    /// Custom endpoint URL, e.g. `http://localhost:4566` for LocalStack
    pub endpoint_url: Option<String>,
}

/// Load the SDK configuration from the environment plus `config` overrides
pub async fn load_sdk_config(config: &AwsConfig) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    tracing::info!(
        region = ?sdk_config.region().map(ToString::to_string),
        endpoint = ?config.endpoint_url,
        "loaded AWS configuration"
    );
    sdk_config
}

/// Flatten an SDK error and its sources into a provider error
fn sdk_error(operation: &str, err: &(dyn std::error::Error + 'static)) -> GatewayError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    GatewayError::provider(operation, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("service error")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn sdk_error_includes_source_chain() {
        let err = Outer(std::io::Error::other("AccessDenied: not authorized"));
        assert_eq!(
            sdk_error("ListAccessKeys", &err).to_string(),
            "ListAccessKeys failed: service error: AccessDenied: not authorized"
        );
    }
}
