//! Settings model

use keyrot_credential::{AgeThresholds, LifecyclePolicy, RosterEntry};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Complete job configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: PolicySettings,
    pub aws: AwsSettings,
    pub asana: AsanaSettings,
    /// Users whose keys are managed, in processing order
    pub roster: Vec<RosterEntry>,
}

/// Age thresholds (whole days) and key ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    pub create_age: u64,
    pub deactivate_age: u64,
    pub delete_age: u64,
    pub max_keys: usize,
}

impl Default for PolicySettings {
    fn default() -> Self {
        let thresholds = AgeThresholds::default();
        Self {
            create_age: thresholds.create_age(),
            deactivate_age: thresholds.deactivate_age(),
            delete_age: thresholds.delete_age(),
            max_keys: LifecyclePolicy::DEFAULT_MAX_KEYS,
        }
    }
}

impl PolicySettings {
    /// Build the validated lifecycle policy
    pub fn to_policy(&self) -> ConfigResult<LifecyclePolicy> {
        let thresholds = AgeThresholds::new(self.create_age, self.deactivate_age, self.delete_age)?;
        Ok(LifecyclePolicy::new(thresholds, self.max_keys)?)
    }
}

/// AWS client settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSettings {
    /// Region override; the SDK's environment lookup applies when unset
    pub region: Option<String>,
    /// Endpoint override (LocalStack)
    pub endpoint_url: Option<String>,
    /// Topic receiving the run summary
    pub topic_arn: String,
}

/// Task tracker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsanaSettings {
    pub base_url: String,
    pub workspace_id: String,
    /// Secret-store path of the API token
    pub token_parameter: String,
    pub due_in_days: u32,
    pub timeout_secs: u64,
    /// Retries for throttled or failed (5xx) requests
    pub max_retries: u32,
    /// Region quoted in the retrieval command sent to key owners
    pub ssm_region: String,
}

impl Default for AsanaSettings {
    fn default() -> Self {
        Self {
            base_url: "https://app.asana.com/api/1.0".into(),
            workspace_id: String::new(),
            token_parameter: "/data/credentials/asana_api_key".into(),
            due_in_days: 10,
            timeout_secs: 10,
            max_retries: 3,
            ssm_region: "us-east-2".into(),
        }
    }
}

impl Settings {
    /// Checks every invocation needs: policy consistency and well-formed
    /// endpoints.
    pub fn validate(&self) -> ConfigResult<()> {
        self.policy.to_policy()?;

        Url::parse(&self.asana.base_url)
            .map_err(|e| ConfigError::invalid("asana.base_url", e.to_string()))?;
        if let Some(endpoint) = &self.aws.endpoint_url {
            Url::parse(endpoint)
                .map_err(|e| ConfigError::invalid("aws.endpoint_url", e.to_string()))?;
        }
        if !(1..=60).contains(&self.asana.timeout_secs) {
            return Err(ConfigError::invalid(
                "asana.timeout_secs",
                format!("must be between 1 and 60, got {}", self.asana.timeout_secs),
            ));
        }
        if self.asana.max_retries > 10 {
            return Err(ConfigError::invalid(
                "asana.max_retries",
                format!("must be at most 10, got {}", self.asana.max_retries),
            ));
        }
        if self.asana.token_parameter.trim().is_empty() {
            return Err(ConfigError::invalid("asana.token_parameter", "must not be empty"));
        }
        Ok(())
    }

    /// Additional checks for a run that publishes and opens tasks
    pub fn validate_for_run(&self) -> ConfigResult<()> {
        self.validate()?;
        if self.aws.topic_arn.trim().is_empty() {
            return Err(ConfigError::invalid("aws.topic_arn", "must be set to publish the run summary"));
        }
        if self.asana.workspace_id.trim().is_empty() {
            return Err(ConfigError::invalid("asana.workspace_id", "must be set to create owner tasks"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid_but_not_runnable() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(matches!(
            settings.validate_for_run(),
            Err(ConfigError::Invalid { field: "aws.topic_arn", .. })
        ));
    }

    #[test]
    fn default_policy_matches_lifecycle_defaults() {
        let policy = PolicySettings::default().to_policy().unwrap();
        assert_eq!(policy, LifecyclePolicy::default());
    }

    #[rstest]
    #[case(100, 100, 110)]
    #[case(90, 120, 110)]
    #[case(0, 0, 0)]
    fn unordered_thresholds_are_rejected(
        #[case] create_age: u64,
        #[case] deactivate_age: u64,
        #[case] delete_age: u64,
    ) {
        let settings = Settings {
            policy: PolicySettings {
                create_age,
                deactivate_age,
                delete_age,
                max_keys: 2,
            },
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Policy(_))));
    }

    #[test]
    fn zero_max_keys_is_rejected() {
        let mut settings = Settings::default();
        settings.policy.max_keys = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::Policy(_))));
    }

    #[test]
    fn run_requires_topic_and_workspace() {
        let mut settings = Settings::default();
        settings.aws.topic_arn = "arn:aws:sns:us-east-2:123456789012:notify-sre".into();
        assert!(matches!(
            settings.validate_for_run(),
            Err(ConfigError::Invalid { field: "asana.workspace_id", .. })
        ));

        settings.asana.workspace_id = "551227202539".into();
        assert!(settings.validate_for_run().is_ok());
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let mut settings = Settings::default();
        settings.asana.base_url = "app.asana.com".into();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "asana.base_url", .. })
        ));
    }
}
