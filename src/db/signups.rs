use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::db::models::{NewSignup, SignupEntry, SignupRow};
use crate::error::AppError;

/// Append-only access to the `waitlist` table. There is deliberately no
/// update or delete.
pub struct SignupRepository;

impl SignupRepository {
    /// Stores one entry. `id` and `timestamp` are assigned here, never taken
    /// from the caller. Duplicate emails and phones are accepted.
    pub async fn insert(pool: &Pool<Sqlite>, entry: NewSignup) -> Result<SignupEntry, AppError> {
        let id = Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, SignupRow>(
            r#"
INSERT INTO waitlist (id, name, email, phone, user_type, reason, timestamp)
VALUES (?, ?, ?, ?, ?, ?, ?)
RETURNING id, name, email, phone, user_type, reason, timestamp
            "#,
        )
        .bind(&id)
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(&entry.phone)
        .bind(entry.user_type.as_str())
        .bind(entry.reason.as_deref())
        .bind(timestamp)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            tracing::error!("Error saving signup: {}", e);
            AppError::Persistence(e)
        })?;

        tracing::debug!(id = %row.id, user_type = %row.user_type, "Signup stored");

        row.try_into()
    }

    pub async fn count(pool: &Pool<Sqlite>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist")
            .fetch_one(pool)
            .await
            .map_err(|e| {
                tracing::error!("Error loading signup count: {}", e);
                AppError::Persistence(e)
            })?;

        Ok(count)
    }

    /// Every entry, newest first. Entries sharing a timestamp come back in
    /// reverse insertion order.
    pub async fn list_all(pool: &Pool<Sqlite>) -> Result<Vec<SignupEntry>, AppError> {
        let rows = sqlx::query_as::<_, SignupRow>(
            r#"
SELECT id, name, email, phone, user_type, reason, timestamp
FROM waitlist
ORDER BY timestamp DESC, rowid DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Error loading signups: {}", e);
            AppError::Persistence(e)
        })?;

        rows.into_iter().map(SignupEntry::try_from).collect()
    }
}
