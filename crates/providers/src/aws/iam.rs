//! IAM identity provider

use async_trait::async_trait;
use aws_sdk_iam::Client;
use aws_sdk_iam::types::{AccessKeyMetadata, StatusType};
use chrono::{DateTime, Utc};
use keyrot_credential::{AccessKey, IssuedKey, KeyStatus};
use keyrot_engine::{GatewayError, GatewayResult, IdentityProvider};

use super::sdk_error;

/// Access keys of IAM users
#[derive(Debug, Clone)]
pub struct IamIdentityProvider {
    client: Client,
}

impl IamIdentityProvider {
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
impl IdentityProvider for IamIdentityProvider {
    #[tracing::instrument(skip(self), fields(provider = "IAM"))]
    async fn list_keys(&self, user_name: &str) -> GatewayResult<Vec<AccessKey>> {
        let output = self
            .client
            .list_access_keys()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| sdk_error("ListAccessKeys", &e))?;

        output
            .access_key_metadata()
            .iter()
            .map(to_access_key)
            .collect()
    }

    #[tracing::instrument(skip(self), fields(provider = "IAM"))]
    async fn create_key(&self, user_name: &str) -> GatewayResult<IssuedKey> {
        let output = self
            .client
            .create_access_key()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| sdk_error("CreateAccessKey", &e))?;

        let key = output
            .access_key()
            .ok_or_else(|| GatewayError::no_response("CreateAccessKey", "access key"))?;
        tracing::debug!(key_id = key.access_key_id(), "created access key");

        Ok(IssuedKey::new(key.access_key_id(), key.secret_access_key()))
    }

    #[tracing::instrument(skip(self), fields(provider = "IAM"))]
    async fn set_status(
        &self,
        user_name: &str,
        key_id: &str,
        status: KeyStatus,
    ) -> GatewayResult<()> {
        let status = match status {
            KeyStatus::Active => StatusType::Active,
            KeyStatus::Inactive => StatusType::Inactive,
        };
        self.client
            .update_access_key()
            .user_name(user_name)
            .access_key_id(key_id)
            .status(status)
            .send()
            .await
            .map_err(|e| sdk_error("UpdateAccessKey", &e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(provider = "IAM"))]
    async fn delete_key(&self, user_name: &str, key_id: &str) -> GatewayResult<()> {
        self.client
            .delete_access_key()
            .user_name(user_name)
            .access_key_id(key_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteAccessKey", &e))?;
        Ok(())
    }
}

fn to_access_key(meta: &AccessKeyMetadata) -> GatewayResult<AccessKey> {
    let id = meta
        .access_key_id()
        .ok_or_else(|| GatewayError::no_response("ListAccessKeys", "access key id"))?;
    let created = meta
        .create_date()
        .and_then(|d| DateTime::<Utc>::from_timestamp(d.secs(), d.subsec_nanos()))
        .ok_or_else(|| GatewayError::no_response("ListAccessKeys", format!("create date for {id}")))?;
    // Anything other than Active (e.g. Expired) can no longer authenticate.
    let status = match meta.status() {
        Some(StatusType::Active) => KeyStatus::Active,
        Some(_) => KeyStatus::Inactive,
        None => return Err(GatewayError::no_response("ListAccessKeys", format!("status for {id}"))),
    };
    Ok(AccessKey::new(id, created, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_iam::primitives::DateTime as SmithyDateTime;

    #[test]
    fn metadata_converts_to_access_key() {
        let meta = AccessKeyMetadata::builder()
            .access_key_id("AKIA1")
            .status(StatusType::Inactive)
            .create_date(SmithyDateTime::from_secs(1_700_000_000))
            .build();

        let key = to_access_key(&meta).unwrap();
        assert_eq!(key.id, "AKIA1");
        assert_eq!(key.status, KeyStatus::Inactive);
        assert_eq!(key.created_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn missing_create_date_is_no_response() {
        let meta = AccessKeyMetadata::builder()
            .access_key_id("AKIA1")
            .status(StatusType::Active)
            .build();

        assert!(matches!(
            to_access_key(&meta),
            Err(GatewayError::NoResponse { .. })
        ));
    }
}
