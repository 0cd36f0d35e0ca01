use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use ring::rand::{SecureRandom, SystemRandom};
use sqlx::{migrate::MigrateDatabase, query, query_as, sqlite::SqlitePoolOptions, Pool, Sqlite};
use tracing::info;

use crate::error::ProviderError;
use crate::model::{NewTask, Task};

/// Task persistence: insert, owner-scoped listing, delete by id. Nothing
/// else; records are immutable once written.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists one record, assigning its id and creation timestamp.
    async fn insert(&self, task: NewTask) -> Result<Task, ProviderError>;
    /// All tasks for one owner, most recently created first.
    async fn tasks_for_owner(&self, owner_id: &str) -> Result<Vec<Task>, ProviderError>;
    /// Deletes by id alone. Callers get no say over whose task it was.
    async fn delete(&self, task_id: &str) -> Result<(), ProviderError>;
}

/// Task store backed by sqlite. Ids are opaque random strings; the `seq`
/// column keeps insertion order stable when two records share a timestamp.
pub struct SqliteTaskStore {
    db: Pool<Sqlite>,
    rng: SystemRandom,
}

impl SqliteTaskStore {
    /// Connects to the database, creating it and the tasks table on first
    /// run.
    pub async fn connect(database_url: &str) -> Result<Self, ProviderError> {
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            info!(%database_url, "creating database");
            Sqlite::create_database(database_url)
                .await
                .map_err(|err| ProviderError::Store(err.to_string()))?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|err| ProviderError::Store(err.to_string()))?;

        query(
            r#"CREATE TABLE IF NOT EXISTS tasks (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            owner_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            priority TEXT NOT NULL,
            due_date TEXT,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL
        );"#,
        )
        .execute(&pool)
        .await
        .map_err(|err| ProviderError::Store(err.to_string()))?;

        Ok(Self {
            db: pool,
            rng: SystemRandom::new(),
        })
    }

    fn next_id(&self) -> Result<String, ProviderError> {
        let mut raw = [0u8; 15];
        self.rng
            .fill(&mut raw)
            .map_err(|_| ProviderError::Store("failed to generate a task id".to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(raw))
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, ProviderError> {
        let record = Task {
            id: self.next_id()?,
            owner_id: task.owner_id,
            title: task.title,
            description: task.description,
            category: task.category,
            priority: task.priority,
            due_date: task.due_date,
            status: task.status,
            created_at: Utc::now(),
        };

        query(
            "INSERT INTO tasks (id, owner_id, title, description, category, priority, due_date, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.owner_id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.category)
        .bind(record.priority)
        .bind(record.due_date)
        .bind(record.status)
        .bind(record.created_at)
        .execute(&self.db)
        .await
        .map_err(|err| ProviderError::Store(err.to_string()))?;

        Ok(record)
    }

    async fn tasks_for_owner(&self, owner_id: &str) -> Result<Vec<Task>, ProviderError> {
        query_as::<_, Task>(
            "SELECT id, owner_id, title, description, category, priority, due_date, status, created_at
             FROM tasks WHERE owner_id = ? ORDER BY created_at DESC, seq DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await
        .map_err(|err| ProviderError::Store(err.to_string()))
    }

    async fn delete(&self, task_id: &str) -> Result<(), ProviderError> {
        query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(&self.db)
            .await
            .map_err(|err| ProviderError::Store(err.to_string()))?;
        Ok(())
    }
}
