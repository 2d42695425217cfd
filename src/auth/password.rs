use bcrypt::BcryptError;
use tracing::error;

/// bcrypt work factor for every hash this service produces.
pub const HASH_COST: u32 = 10;

pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plain, HASH_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        e
    })
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        e
    })
}

/// Runs the hash on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&plain)).await??;
    Ok(hash)
}

pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    let ok = tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await??;
    Ok(ok)
}
