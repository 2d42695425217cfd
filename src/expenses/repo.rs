use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::expenses::repo_types::ExpenseRecord;

/// Every query is scoped by the owning user. Listings come back ordered by
/// `(date, id)` ascending.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn list_all(&self, user_id: i64) -> Result<Vec<ExpenseRecord>, StoreError>;

    /// Rows dated on the store's current calendar day.
    async fn list_today(&self, user_id: i64) -> Result<Vec<ExpenseRecord>, StoreError>;

    /// Rows whose `item` contains `needle`, compared after lower-casing both.
    async fn search(&self, user_id: i64, needle: &str) -> Result<Vec<ExpenseRecord>, StoreError>;

    /// Inserts with the store's clock as `date`; returns the new id.
    async fn insert(&self, user_id: i64, item: &str, paid: i64) -> Result<i64, StoreError>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete(&self, id: i64, user_id: i64) -> Result<u64, StoreError>;
}

#[derive(Clone)]
pub struct PgExpenseStore {
    db: PgPool,
}

impl PgExpenseStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpenseStore for PgExpenseStore {
    async fn list_all(&self, user_id: i64) -> Result<Vec<ExpenseRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, item, paid, date
            FROM expense
            WHERE user_id = $1
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_today(&self, user_id: i64) -> Result<Vec<ExpenseRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, item, paid, date
            FROM expense
            WHERE user_id = $1 AND date::date = CURRENT_DATE
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn search(&self, user_id: i64, needle: &str) -> Result<Vec<ExpenseRecord>, StoreError> {
        // strpos keeps `%` and `_` in the needle literal, unlike LIKE.
        let rows = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, item, paid, date
            FROM expense
            WHERE user_id = $1 AND strpos(lower(item), lower($2)) > 0
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .bind(needle)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, user_id: i64, item: &str, paid: i64) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO expense (user_id, item, paid, date)
            VALUES ($1, $2, $3, now())
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(item)
        .bind(paid)
        .fetch_one(&self.db)
        .await?;
        Ok(id)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM expense
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }
}
