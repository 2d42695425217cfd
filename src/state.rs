use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::repo::{PgUserStore, UserStore};
use crate::config::AppConfig;
use crate::db;
use crate::expenses::repo::{ExpenseStore, PgExpenseStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub expenses: Arc<dyn ExpenseStore>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(config).await?;
        db::migrate(&pool).await;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(db: PgPool) -> Self {
        Self::from_parts(
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgExpenseStore::new(db)),
        )
    }

    pub fn from_parts(users: Arc<dyn UserStore>, expenses: Arc<dyn ExpenseStore>) -> Self {
        Self { users, expenses }
    }
}
