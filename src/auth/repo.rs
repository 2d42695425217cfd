use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::UserRecord;
use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every row whose username matches exactly. Callers decide what
    /// multiplicity means.
    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>, StoreError> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }
}
