//! In-memory stores and a router factory for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use time::OffsetDateTime;

use crate::app::build_app;
use crate::auth::password::hash_password;
use crate::auth::repo::UserStore;
use crate::auth::repo_types::UserRecord;
use crate::error::StoreError;
use crate::expenses::repo::ExpenseStore;
use crate::expenses::repo_types::ExpenseRecord;
use crate::state::AppState;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserRecord>>,
    fail_with: Option<Option<String>>,
}

impl MemoryUserStore {
    pub fn with_user(self, id: i64, username: &str, password: &str) -> Self {
        let hash = hash_password(password).expect("hash test password");
        self.with_raw_user(id, username, &hash)
    }

    pub fn with_raw_user(self, id: i64, username: &str, password_hash: &str) -> Self {
        self.users.lock().unwrap().push(UserRecord {
            id,
            username: username.into(),
            password: password_hash.into(),
        });
        self
    }

    /// Every call fails; `message` mimics a driver-supplied error text.
    pub fn failing(message: Option<&str>) -> Self {
        Self {
            fail_with: Some(message.map(str::to_string)),
            ..Self::default()
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>, StoreError> {
        if let Some(message) = &self.fail_with {
            return Err(StoreError {
                message: message.clone(),
            });
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.username == username)
            .cloned()
            .collect())
    }
}

struct Row {
    user_id: i64,
    record: ExpenseRecord,
}

#[derive(Default)]
pub struct MemoryExpenseStore {
    rows: Mutex<Vec<Row>>,
    fail_with: Option<Option<String>>,
    calls: Mutex<usize>,
}

impl MemoryExpenseStore {
    pub fn failing(message: Option<&str>) -> Self {
        Self {
            fail_with: Some(message.map(str::to_string)),
            ..Self::default()
        }
    }

    /// Inserts a row with an explicit date, returning its id.
    pub fn seed(&self, user_id: i64, item: &str, paid: i64, date: OffsetDateTime) -> i64 {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.record.id).max().unwrap_or(0) + 1;
        rows.push(Row {
            user_id,
            record: ExpenseRecord {
                id,
                item: item.into(),
                paid,
                date,
            },
        });
        id
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.lock().unwrap().iter().any(|r| r.record.id == id)
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn begin(&self) -> Result<(), StoreError> {
        *self.calls.lock().unwrap() += 1;
        match &self.fail_with {
            Some(message) => Err(StoreError {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn select(&self, user_id: i64, keep: impl Fn(&ExpenseRecord) -> bool) -> Vec<ExpenseRecord> {
        let mut out: Vec<ExpenseRecord> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && keep(&r.record))
            .map(|r| r.record.clone())
            .collect();
        out.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));
        out
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn list_all(&self, user_id: i64) -> Result<Vec<ExpenseRecord>, StoreError> {
        self.begin()?;
        Ok(self.select(user_id, |_| true))
    }

    async fn list_today(&self, user_id: i64) -> Result<Vec<ExpenseRecord>, StoreError> {
        self.begin()?;
        let today = OffsetDateTime::now_utc().date();
        Ok(self.select(user_id, |e| e.date.date() == today))
    }

    async fn search(&self, user_id: i64, needle: &str) -> Result<Vec<ExpenseRecord>, StoreError> {
        self.begin()?;
        let needle = needle.to_lowercase();
        Ok(self.select(user_id, |e| e.item.to_lowercase().contains(&needle)))
    }

    async fn insert(&self, user_id: i64, item: &str, paid: i64) -> Result<i64, StoreError> {
        self.begin()?;
        Ok(self.seed(user_id, item, paid, OffsetDateTime::now_utc()))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<u64, StoreError> {
        self.begin()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.record.id == id && r.user_id == user_id));
        Ok((before - rows.len()) as u64)
    }
}

pub fn test_server(users: MemoryUserStore, expenses: Arc<MemoryExpenseStore>) -> TestServer {
    let state = AppState::from_parts(Arc::new(users), expenses);
    TestServer::new(build_app(state)).expect("Could not create test server.")
}
