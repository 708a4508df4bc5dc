use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::db::{SignupDraft, SignupEntry, SignupRepository};
use crate::error::AppError;
use crate::form::FormDraft;

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// POST /api/waitlist
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupDraft>,
) -> Result<(StatusCode, Json<SignupEntry>), AppError> {
    let mut form = FormDraft::from_draft(req);
    let entry = form
        .submit(&state.db, state.analytics.as_ref())
        .await
        .map_err(AppError::on_submit)?;

    tracing::info!(id = %entry.id, user_type = %entry.user_type, "New waitlist signup");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/waitlist/count
pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let count = SignupRepository::count(&state.db).await?;
    Ok(Json(CountResponse { count }))
}
