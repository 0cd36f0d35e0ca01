//! Test doubles and harness shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use tokio::sync::Mutex;

use taskboard::error::ProviderError;
use taskboard::identity::IdentityGateway;
use taskboard::model::{Account, NewTask, Task};
use taskboard::route::create_router;
use taskboard::session::MemorySessionStore;
use taskboard::store::{SqliteTaskStore, TaskStore};
use taskboard::view::Views;
use taskboard::AppState;

/// In-memory identity gateway with a seedable account list.
pub struct FakeIdentityGateway {
    accounts: Mutex<Vec<Account>>,
}

impl FakeIdentityGateway {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
        }
    }

    pub async fn seed(&self, id: &str, email: &str) {
        self.accounts.lock().await.push(Account {
            id: id.to_string(),
            email: email.to_string(),
        });
    }
}

#[async_trait]
impl IdentityGateway for FakeIdentityGateway {
    async fn create_account(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<String, ProviderError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.iter().any(|account| account.email == email) {
            return Err(ProviderError::Identity(format!(
                "An account with the email {email} already exists"
            )));
        }

        let id = format!("acct-{}", accounts.len() + 1);
        accounts.push(Account {
            id: id.clone(),
            email: email.to_string(),
        });
        Ok(id)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Account, ProviderError> {
        self.accounts
            .lock()
            .await
            .iter()
            .find(|account| account.email == email)
            .cloned()
            .ok_or_else(|| ProviderError::Identity(format!("no account matches {email}")))
    }
}

/// Sqlite task store wrapper that counts every call crossing the trait, so
/// tests can assert the access gate kept a request away from the store.
pub struct CountingTaskStore {
    inner: SqliteTaskStore,
    calls: AtomicUsize,
}

impl CountingTaskStore {
    pub fn new(inner: SqliteTaskStore) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskStore for CountingTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(task).await
    }

    async fn tasks_for_owner(&self, owner_id: &str) -> Result<Vec<Task>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.tasks_for_owner(owner_id).await
    }

    async fn delete(&self, task_id: &str) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(task_id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub identity: Arc<FakeIdentityGateway>,
    pub tasks: Arc<CountingTaskStore>,
    _db_dir: tempfile::TempDir,
}

/// Builds the full router over a fresh sqlite database, the fake identity
/// gateway, and a real in-process session store.
pub async fn test_app() -> TestApp {
    let db_dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}/tasks.db", db_dir.path().display());

    let store = SqliteTaskStore::connect(&db_url).await.unwrap();
    let tasks = Arc::new(CountingTaskStore::new(store));
    let identity = Arc::new(FakeIdentityGateway::new());

    let app_state = Arc::new(AppState {
        identity: identity.clone(),
        tasks: tasks.clone(),
        sessions: Arc::new(MemorySessionStore::new("test-secret")),
        views: Views::new().unwrap(),
    });

    TestApp {
        router: create_router(app_state, db_dir.path()),
        identity,
        tasks,
        _db_dir: db_dir,
    }
}
