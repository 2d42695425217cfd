use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    expenses::{
        dto::{CreateExpenseRequest, CreatedExpense, Deleted, ExpenseList, SearchQuery, UserQuery},
        services::{non_empty, parse_user_id, summarize},
    },
    extract::{parse_id, ApiPath, ApiQuery, JsonOrForm, Scalar},
    state::AppState,
};

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/today", get(list_today))
        .route("/expenses/search", get(search_expenses))
        .route("/expenses/:id", delete(delete_expense))
}

fn required_user_id(q: &UserQuery) -> Result<i64, ApiError> {
    let raw = non_empty(q.user_id.as_deref())
        .ok_or_else(|| ApiError::Validation("userId required".into()))?;
    parse_user_id(raw)
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<UserQuery>,
) -> Result<Json<ExpenseList>, ApiError> {
    let user_id = required_user_id(&q)?;
    let items = state.expenses.list_all(user_id).await.map_err(|e| {
        error!(error = %e, user_id, "list_all failed");
        ApiError::storage(e, "Database error")
    })?;
    Ok(Json(summarize(items)))
}

#[instrument(skip(state))]
pub async fn list_today(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<UserQuery>,
) -> Result<Json<ExpenseList>, ApiError> {
    let user_id = required_user_id(&q)?;
    let items = state.expenses.list_today(user_id).await.map_err(|e| {
        error!(error = %e, user_id, "list_today failed");
        ApiError::storage(e, "Database error")
    })?;
    Ok(Json(summarize(items)))
}

/// `total` is included for consistency; clients may ignore it here.
#[instrument(skip(state))]
pub async fn search_expenses(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<SearchQuery>,
) -> Result<Json<ExpenseList>, ApiError> {
    let (Some(raw_user_id), Some(needle)) =
        (non_empty(q.user_id.as_deref()), non_empty(q.q.as_deref()))
    else {
        return Err(ApiError::Validation("userId and q required".into()));
    };
    let user_id = parse_user_id(raw_user_id)?;

    let items = state.expenses.search(user_id, needle).await.map_err(|e| {
        error!(error = %e, user_id, "search failed");
        ApiError::storage(e, "Database error")
    })?;
    Ok(Json(summarize(items)))
}

/// POST /expenses { userId, item, amount }. `date` is stamped by the store.
#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<CreateExpenseRequest>,
) -> Result<Json<CreatedExpense>, ApiError> {
    let (Some(user_id), Some(item), Some(amount)) = (
        payload.user_id.filter(Scalar::is_present),
        payload.item.filter(Scalar::is_present),
        payload.amount,
    ) else {
        return Err(ApiError::Validation("userId, item, amount required".into()));
    };

    // Deliberately lenient: "12abc" is stored as 12.
    let paid = amount
        .to_int_lenient()
        .ok_or_else(|| ApiError::Validation("amount must be number".into()))?;
    let user_id = user_id
        .to_int_strict()
        .ok_or_else(|| ApiError::Validation("userId must be number".into()))?;
    let item = item.to_text();

    let id = state.expenses.insert(user_id, &item, paid).await.map_err(|e| {
        error!(error = %e, user_id, "insert expense failed");
        ApiError::storage(e, "Database error")
    })?;

    info!(user_id, id, paid, "expense created");
    Ok(Json(CreatedExpense { ok: true, id }))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiQuery(q): ApiQuery<UserQuery>,
) -> Result<Json<Deleted>, ApiError> {
    let user_id = required_user_id(&q)?;
    // A non-integer id cannot match any row.
    let Some(id) = parse_id(&id) else {
        warn!(user_id, id = %id, "delete with non-numeric id");
        return Err(ApiError::NotFound("Not found".into()));
    };

    let removed = state.expenses.delete(id, user_id).await.map_err(|e| {
        error!(error = %e, user_id, id, "delete expense failed");
        ApiError::storage(e, "Database error")
    })?;

    if removed == 0 {
        warn!(user_id, id, "delete matched no row");
        return Err(ApiError::NotFound("Not found".into()));
    }

    info!(user_id, id, "expense deleted");
    Ok(Json(Deleted { ok: true }))
}
