use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// One expense as returned by every listing: `{id, item, paid, date}`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ExpenseRecord {
    pub id: i64,
    pub item: String,
    pub paid: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}
