//! In-memory gateways
//!
//! Stand-ins for the identity provider, secret store and notifier that keep
//! their state in memory, log every call and can be told to fail.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keyrot_credential::{AccessKey, IssuedKey, KeyStatus};
use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{IdentityProvider, Notifier, SecretStore, TaskReceipt};

/// Identity-provider operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IamOp {
    List,
    Create,
    SetStatus,
    Delete,
}

/// A call received by [`InMemoryIam`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IamCall {
    List { user: String },
    Create { user: String },
    SetStatus { user: String, key_id: String, status: KeyStatus },
    Delete { user: String, key_id: String },
}

/// In-memory identity provider
#[derive(Debug)]
pub struct InMemoryIam {
    users: Mutex<BTreeMap<String, Vec<AccessKey>>>,
    failures: Mutex<HashMap<(IamOp, String), GatewayError>>,
    calls: Mutex<Vec<IamCall>>,
    issued: Mutex<u32>,
    clock: DateTime<Utc>,
}

impl InMemoryIam {
    /// Empty provider; new keys are stamped with `clock`
    #[must_use]
    pub fn new(clock: DateTime<Utc>) -> Self {
        Self {
            users: Mutex::new(BTreeMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            issued: Mutex::new(0),
            clock,
        }
    }

    /// Seed a user's keys
    #[must_use]
    pub fn with_user(self, user: &str, keys: Vec<AccessKey>) -> Self {
        self.users.lock().insert(user.to_string(), keys);
        self
    }

    /// Make `op` fail for `user` with a provider error
    #[must_use]
    pub fn failing(self, op: IamOp, user: &str) -> Self {
        let err = GatewayError::provider(format!("{op:?}"), "injected failure");
        self.failures.lock().insert((op, user.to_string()), err);
        self
    }

    /// Make `op` fail for `user` with a specific error
    #[must_use]
    pub fn failing_with(self, op: IamOp, user: &str, err: GatewayError) -> Self {
        self.failures.lock().insert((op, user.to_string()), err);
        self
    }

    /// Current keys of a user
    #[must_use]
    pub fn keys(&self, user: &str) -> Vec<AccessKey> {
        self.users.lock().get(user).cloned().unwrap_or_default()
    }

    /// Every call received, in order
    #[must_use]
    pub fn calls(&self) -> Vec<IamCall> {
        self.calls.lock().clone()
    }

    /// Calls received for one user
    #[must_use]
    pub fn calls_for(&self, user: &str) -> Vec<IamCall> {
        self.calls()
            .into_iter()
            .filter(|call| match call {
                IamCall::List { user: u }
                | IamCall::Create { user: u }
                | IamCall::SetStatus { user: u, .. }
                | IamCall::Delete { user: u, .. } => u == user,
            })
            .collect()
    }

    fn check(&self, op: IamOp, user: &str) -> GatewayResult<()> {
        match self.failures.lock().get(&(op, user.to_string())) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn no_such_key(operation: &str, user: &str, key_id: &str) -> GatewayError {
        GatewayError::provider(
            operation,
            format!("NoSuchEntity: key {key_id} not found for user {user}"),
        )
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIam {
    async fn list_keys(&self, user_name: &str) -> GatewayResult<Vec<AccessKey>> {
        self.calls.lock().push(IamCall::List {
            user: user_name.to_string(),
        });
        self.check(IamOp::List, user_name)?;
        Ok(self.keys(user_name))
    }

    async fn create_key(&self, user_name: &str) -> GatewayResult<IssuedKey> {
        self.calls.lock().push(IamCall::Create {
            user: user_name.to_string(),
        });
        self.check(IamOp::Create, user_name)?;

        let n = {
            let mut issued = self.issued.lock();
            *issued += 1;
            *issued
        };
        let key = IssuedKey::new(format!("AKIANEW{n}"), format!("secret-{n}"));
        self.users
            .lock()
            .entry(user_name.to_string())
            .or_default()
            .push(AccessKey::active(key.id.clone(), self.clock));
        Ok(key)
    }

    async fn set_status(
        &self,
        user_name: &str,
        key_id: &str,
        status: KeyStatus,
    ) -> GatewayResult<()> {
        self.calls.lock().push(IamCall::SetStatus {
            user: user_name.to_string(),
            key_id: key_id.to_string(),
            status,
        });
        self.check(IamOp::SetStatus, user_name)?;

        let mut users = self.users.lock();
        let key = users
            .get_mut(user_name)
            .and_then(|keys| keys.iter_mut().find(|k| k.id == key_id))
            .ok_or_else(|| Self::no_such_key("UpdateAccessKey", user_name, key_id))?;
        key.status = status;
        Ok(())
    }

    async fn delete_key(&self, user_name: &str, key_id: &str) -> GatewayResult<()> {
        self.calls.lock().push(IamCall::Delete {
            user: user_name.to_string(),
            key_id: key_id.to_string(),
        });
        self.check(IamOp::Delete, user_name)?;

        let mut users = self.users.lock();
        let keys = users
            .get_mut(user_name)
            .ok_or_else(|| Self::no_such_key("DeleteAccessKey", user_name, key_id))?;
        let before = keys.len();
        keys.retain(|k| k.id != key_id);
        if keys.len() == before {
            return Err(Self::no_such_key("DeleteAccessKey", user_name, key_id));
        }
        Ok(())
    }
}

/// In-memory secret store
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    values: Mutex<HashMap<String, SecretString>>,
    failing_puts: Mutex<bool>,
    puts: Mutex<Vec<String>>,
}

impl InMemorySecretStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a secret
    #[must_use]
    pub fn with_secret(self, path: &str, value: &str) -> Self {
        self.values
            .lock()
            .insert(path.to_string(), SecretString::from(value.to_string()));
        self
    }

    /// Make every write fail
    #[must_use]
    pub fn failing_puts(self) -> Self {
        *self.failing_puts.lock() = true;
        self
    }

    /// Stored value, exposed for assertions
    #[must_use]
    pub fn get(&self, path: &str) -> Option<String> {
        self.values
            .lock()
            .get(path)
            .map(|v| v.expose_secret().to_string())
    }

    /// Paths written, in order (including failed writes)
    #[must_use]
    pub fn puts(&self) -> Vec<String> {
        self.puts.lock().clone()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn put_secret(&self, path: &str, value: &SecretString) -> GatewayResult<()> {
        self.puts.lock().push(path.to_string());
        if *self.failing_puts.lock() {
            return Err(GatewayError::provider("PutParameter", "injected failure"));
        }
        self.values.lock().insert(path.to_string(), value.clone());
        Ok(())
    }

    async fn get_secret(&self, path: &str) -> GatewayResult<SecretString> {
        self.values
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| GatewayError::no_response("GetParameter", format!("value for {path}")))
    }
}

/// A task requested from [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTask {
    pub user_name: String,
    pub secret_path: String,
    pub assignee: String,
}

/// A summary published through [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSummary {
    pub subject: String,
    pub body: String,
}

/// Notifier that records what it was asked to send
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    tasks: Mutex<Vec<RecordedTask>>,
    summaries: Mutex<Vec<RecordedSummary>>,
    failing_tasks: Mutex<bool>,
    failing_publish: Mutex<bool>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every task creation fail
    #[must_use]
    pub fn failing_tasks(self) -> Self {
        *self.failing_tasks.lock() = true;
        self
    }

    /// Make summary publishing fail
    #[must_use]
    pub fn failing_publish(self) -> Self {
        *self.failing_publish.lock() = true;
        self
    }

    #[must_use]
    pub fn tasks(&self) -> Vec<RecordedTask> {
        self.tasks.lock().clone()
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<RecordedSummary> {
        self.summaries.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn create_task(
        &self,
        user_name: &str,
        secret_path: &str,
        assignee: &str,
    ) -> GatewayResult<TaskReceipt> {
        if *self.failing_tasks.lock() {
            return Err(GatewayError::Http {
                operation: "CreateTask".into(),
                status: 503,
                message: "Service Unavailable".into(),
            });
        }
        let mut tasks = self.tasks.lock();
        tasks.push(RecordedTask {
            user_name: user_name.to_string(),
            secret_path: secret_path.to_string(),
            assignee: assignee.to_string(),
        });
        Ok(TaskReceipt::with_url(format!(
            "https://tasks.example.test/{}",
            tasks.len()
        )))
    }

    async fn publish_summary(&self, subject: &str, body: &str) -> GatewayResult<()> {
        if *self.failing_publish.lock() {
            return Err(GatewayError::provider("Publish", "injected failure"));
        }
        self.summaries.lock().push(RecordedSummary {
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
