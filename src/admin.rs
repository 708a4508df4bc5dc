//! Admin panel gate and session state.
//!
//! The gate is a plain email comparison. It toggles what the panel shows and
//! nothing more: the signup listing it fronts is not otherwise protected, and
//! the configured email is not a secret. Real access control would have to
//! live in the store itself (row-level security) or behind an endpoint that
//! checks a verified credential.

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::analytics::{self, Analytics};
use crate::db::models::SignupEntry;
use crate::db::SignupRepository;
use crate::error::AppError;
use crate::event_params;
use crate::export::CsvExport;

/// Compares candidate emails against the configured admin email, ignoring
/// case and surrounding whitespace.
#[derive(Debug, Clone)]
pub struct AdminGate {
    admin_email: String,
}

impl AdminGate {
    pub fn new(admin_email: &str) -> Self {
        AdminGate {
            admin_email: normalize(admin_email),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn authorize(&self, candidate: &str) -> bool {
        normalize(candidate) == self.admin_email
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Observable admin UI states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminState {
    LoggedOut,
    PanelOpen,
    PanelClosed,
}

/// Per-visitor admin view state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    is_authorized: bool,
    panel_open: bool,
    login_prompt_open: bool,
    signups: Vec<SignupEntry>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authorized(&self) -> bool {
        self.is_authorized
    }

    pub fn login_prompt_open(&self) -> bool {
        self.login_prompt_open
    }

    pub fn signups(&self) -> &[SignupEntry] {
        &self.signups
    }

    pub fn state(&self) -> AdminState {
        match (self.is_authorized, self.panel_open) {
            (false, _) => AdminState::LoggedOut,
            (true, true) => AdminState::PanelOpen,
            (true, false) => AdminState::PanelClosed,
        }
    }

    /// Admin button. Logged out visitors get the login prompt; an authorized
    /// admin flips the panel, reloading the list whenever it opens.
    pub async fn toggle(&mut self, pool: &Pool<Sqlite>) -> Result<AdminState, AppError> {
        if !self.is_authorized {
            self.login_prompt_open = true;
            return Ok(self.state());
        }

        self.panel_open = !self.panel_open;
        if self.panel_open {
            self.reload(pool).await?;
        }
        Ok(self.state())
    }

    pub fn dismiss_login(&mut self) {
        self.login_prompt_open = false;
    }

    /// A matching email authorizes the session and opens the panel. A
    /// mismatch leaves every flag as it was.
    pub async fn login(
        &mut self,
        gate: &AdminGate,
        email: &str,
        pool: &Pool<Sqlite>,
        analytics: &dyn Analytics,
    ) -> Result<AdminState, AppError> {
        if !gate.authorize(email) {
            tracing::warn!("Admin login rejected");
            analytics.track(analytics::ADMIN_LOGIN_FAILED, event_params!());
            return Err(AppError::AuthorizationDenied);
        }

        self.is_authorized = true;
        self.login_prompt_open = false;
        self.panel_open = true;
        analytics.track(analytics::ADMIN_LOGIN_SUCCESS, event_params!());

        self.reload(pool).await?;
        Ok(self.state())
    }

    /// Replace the cached list. On failure the previous list is kept.
    pub async fn reload(&mut self, pool: &Pool<Sqlite>) -> Result<(), AppError> {
        self.signups = SignupRepository::list_all(pool)
            .await
            .map_err(AppError::on_load)?;
        Ok(())
    }

    /// CSV of the cached list.
    pub fn export(&self, today: NaiveDate, analytics: &dyn Analytics) -> Result<CsvExport, AppError> {
        if !self.is_authorized {
            return Err(AppError::AuthorizationDenied);
        }

        let export = CsvExport::new(&self.signups, today);
        analytics.track(
            analytics::EXPORT_SIGNUPS,
            event_params!("count" => self.signups.len()),
        );
        Ok(export)
    }
}
