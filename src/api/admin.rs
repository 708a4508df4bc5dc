//! Admin endpoints.
//!
//! `login` only answers whether an email matches the configured admin
//! email. The listing and export endpoints do not check anything; see
//! `crate::admin` for why that is the documented posture.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::db::{SignupEntry, SignupRepository};
use crate::error::AppError;
use crate::event_params;
use crate::export::{CsvExport, CSV_MIME_TYPE};

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub authorized: bool,
    pub email: String,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    if !state.gate.authorize(&req.email) {
        tracing::warn!("Admin login rejected");
        state.analytics.track(analytics::ADMIN_LOGIN_FAILED, event_params!());
        return Err(AppError::AuthorizationDenied);
    }

    state.analytics.track(analytics::ADMIN_LOGIN_SUCCESS, event_params!());

    Ok(Json(AdminLoginResponse {
        authorized: true,
        email: state.gate.admin_email().to_string(),
    }))
}

/// GET /api/admin/signups
pub async fn list_signups(
    State(state): State<AppState>,
) -> Result<Json<Vec<SignupEntry>>, AppError> {
    let signups = SignupRepository::list_all(&state.db)
        .await
        .map_err(AppError::on_load)?;
    Ok(Json(signups))
}

/// GET /api/admin/export
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let signups = SignupRepository::list_all(&state.db)
        .await
        .map_err(AppError::on_load)?;
    let export = CsvExport::new(&signups, chrono::Utc::now().date_naive());

    state.analytics.track(
        analytics::EXPORT_SIGNUPS,
        event_params!("count" => signups.len()),
    );

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, CSV_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}
