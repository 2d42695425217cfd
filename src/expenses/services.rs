use crate::error::ApiError;
use crate::expenses::dto::ExpenseList;
use crate::expenses::repo_types::ExpenseRecord;
use crate::extract::parse_id;

/// Sum of `paid` over exactly the rows being returned.
pub fn total_paid(items: &[ExpenseRecord]) -> i64 {
    items.iter().fold(0i64, |acc, e| acc.saturating_add(e.paid))
}

pub fn summarize(items: Vec<ExpenseRecord>) -> ExpenseList {
    let total = total_paid(&items);
    ExpenseList {
        ok: true,
        items,
        total,
    }
}

/// Absent or empty counts as missing.
pub fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

pub fn parse_user_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::Validation("userId must be number".into()))
}
