//! SSM Parameter Store secret store

use async_trait::async_trait;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::types::ParameterType;
use keyrot_engine::{GatewayError, GatewayResult, SecretStore};
use secrecy::{ExposeSecret, SecretString};

use super::sdk_error;

/// Secrets stored as `SecureString` parameters
#[derive(Debug, Clone)]
pub struct SsmSecretStore {
    client: Client,
}

impl SsmSecretStore {
    #[must_use]
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::from_client(Client::new(sdk_config))
    }

    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SsmSecretStore {
    #[tracing::instrument(skip(self, value), fields(provider = "SSM"))]
    async fn put_secret(&self, path: &str, value: &SecretString) -> GatewayResult<()> {
        let output = self
            .client
            .put_parameter()
            .name(path)
            .value(value.expose_secret())
            .r#type(ParameterType::SecureString)
            .overwrite(true)
            .send()
            .await
            .map_err(|e| sdk_error("PutParameter", &e))?;

        tracing::debug!(version = output.version(), "stored parameter");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(provider = "SSM"))]
    async fn get_secret(&self, path: &str) -> GatewayResult<SecretString> {
        let output = self
            .client
            .get_parameter()
            .name(path)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| sdk_error("GetParameter", &e))?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(|v| SecretString::from(v.to_string()))
            .ok_or_else(|| GatewayError::no_response("GetParameter", format!("value for {path}")))
    }
}
