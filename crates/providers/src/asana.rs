//! Asana task client
//!
//! Opens a task asking the key owner to fetch their new key from the secret
//! store. The API token itself lives in the secret store and is read on every
//! call, so a rotated token is picked up without a restart.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use keyrot_credential::utils::short_date;
use keyrot_engine::{GatewayError, GatewayResult, SecretStore, TaskReceipt};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::retry::{RetryPolicy, retry_with_policy};

const OPERATION: &str = "CreateTask";

/// Asana client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsanaConfig {
    /// API root, e.g. `https://app.asana.com/api/1.0`
    pub base_url: String,
    /// Workspace the tasks are created in
    pub workspace_id: String,
    /// Secret-store path of the API token
    pub token_parameter: String,
    /// Days from now until the task is due
    pub due_in_days: u32,
    /// Request timeout
    pub timeout: Duration,
    /// Region quoted in the retrieval command in the task notes
    pub ssm_region: String,
    pub retry: RetryPolicy,
}

impl Default for AsanaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.asana.com/api/1.0".into(),
            workspace_id: String::new(),
            token_parameter: "/data/credentials/asana_api_key".into(),
            due_in_days: 10,
            timeout: Duration::from_secs(10),
            ssm_region: "us-east-2".into(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Request body of `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub name: String,
    pub notes: String,
    pub workspace: String,
    pub assignee: String,
    /// `YYYY-MM-DD`
    pub due_on: String,
}

#[derive(Serialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct CreatedEnvelope {
    data: CreatedTask,
}

#[derive(Deserialize)]
struct CreatedTask {
    #[serde(default)]
    permalink_url: Option<String>,
}

/// Creates owner tasks through the Asana REST API
pub struct AsanaTaskClient {
    http: reqwest::Client,
    tasks_url: Url,
    config: AsanaConfig,
    secrets: Arc<dyn SecretStore>,
}

impl AsanaTaskClient {
    /// Build a client; `secrets` supplies the API token.
    pub fn new(config: AsanaConfig, secrets: Arc<dyn SecretStore>) -> GatewayResult<Self> {
        let tasks_url = tasks_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::provider("BuildHttpClient", e))?;

        tracing::debug!(url = %tasks_url, workspace = %config.workspace_id, "initialized Asana client");

        Ok(Self {
            http,
            tasks_url,
            config,
            secrets,
        })
    }

    /// Task body for one owner, due `due_in_days` after `today`
    #[must_use]
    pub fn task_for(&self, secret_path: &str, assignee: &str, today: DateTime<Utc>) -> NewTask {
        let due = today + chrono::Duration::days(i64::from(self.config.due_in_days));
        let pretty_due = short_date(due);
        NewTask {
            name: format!("AWS IAM Key Rotation {pretty_due}"),
            notes: task_notes(&pretty_due, &self.config.ssm_region, secret_path),
            workspace: self.config.workspace_id.clone(),
            assignee: assignee.to_string(),
            due_on: due.format("%Y-%m-%d").to_string(),
        }
    }

    /// Create a task with an explicit reference date
    #[tracing::instrument(skip(self, today), fields(provider = "Asana"))]
    pub async fn create_task_at(
        &self,
        user_name: &str,
        secret_path: &str,
        assignee: &str,
        today: DateTime<Utc>,
    ) -> GatewayResult<TaskReceipt> {
        let token = self.secrets.get_secret(&self.config.token_parameter).await?;
        let body = Envelope {
            data: self.task_for(secret_path, assignee, today),
        };

        let created: CreatedEnvelope = retry_with_policy(&self.config.retry, OPERATION, |_| async {
            let response = self
                .http
                .post(self.tasks_url.clone())
                .bearer_auth(token.expose_secret())
                .json(&body)
                .send()
                .await
                .map_err(|e| self.request_error(e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GatewayError::Http {
                    operation: OPERATION.into(),
                    status: status.as_u16(),
                    message: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            response
                .json::<CreatedEnvelope>()
                .await
                .map_err(|e| GatewayError::provider(OPERATION, format!("unreadable response: {e}")))
        })
        .await?;

        Ok(TaskReceipt {
            url: created.data.permalink_url,
        })
    }

    pub async fn create_task(
        &self,
        user_name: &str,
        secret_path: &str,
        assignee: &str,
    ) -> GatewayResult<TaskReceipt> {
        self.create_task_at(user_name, secret_path, assignee, Utc::now())
            .await
    }

    fn request_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout {
                operation: OPERATION.into(),
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            GatewayError::provider(OPERATION, err)
        }
    }
}

impl std::fmt::Debug for AsanaTaskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanaTaskClient")
            .field("tasks_url", &self.tasks_url.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// `{base_url}/tasks`, regardless of a trailing slash on the base
fn tasks_url(base: &str) -> GatewayResult<Url> {
    let joined = format!("{}/tasks", base.trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| GatewayError::provider("BuildTasksUrl", e))
}

fn task_notes(pretty_due: &str, ssm_region: &str, secret_path: &str) -> String {
    format!(
        "Please rotate your IAM keys.\n\
         You have until {pretty_due} to update your keys before your keys are deactivated.\n\
         \n\
         To gain access to your IAM keys please run:\n\
         \n\
         aws ssm get-parameter --region {ssm_region} --name {secret_path} --with-decryption --query Parameter.Value --output text\n\
         \n\
         To verify success run:\n\
         \n\
         aws sts get-caller-identity\n\
         \n\
         If you have issues with the above command reach out to the platform team."
    )
}
