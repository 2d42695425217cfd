use serde::{Deserialize, Serialize};

use crate::expenses::repo_types::ExpenseRecord;
use crate::extract::Scalar;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub user_id: Option<Scalar>,
    #[serde(default)]
    pub item: Option<Scalar>,
    #[serde(default)]
    pub amount: Option<Scalar>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseList {
    pub ok: bool,
    pub items: Vec<ExpenseRecord>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatedExpense {
    pub ok: bool,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub ok: bool,
}
