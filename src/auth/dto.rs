use serde::{Deserialize, Serialize};

use crate::extract::Scalar;

/// Request body for login (JSON or form).
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<Scalar>,
    #[serde(default)]
    pub password: Option<Scalar>,
}

/// Successful login. No token: clients keep `userId` and send it back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub ok: bool,
    pub user_id: i64,
    pub username: String,
}
