use sqlx::{Pool, Sqlite};

use crate::admin::AdminSession;
use crate::analytics::{self, Analytics};
use crate::db::models::SignupEntry;
use crate::db::SignupRepository;
use crate::error::AppError;
use crate::event_params;
use crate::form::FormDraft;

/// View state of the landing page for one visitor.
#[derive(Debug, Clone, Default)]
pub struct LandingPage {
    pub form: FormDraft,
    pub admin: AdminSession,
    /// `None` until the first successful count.
    pub total_signups: Option<i64>,
    pub submitted: bool,
}

impl LandingPage {
    /// Fresh page: empty form, logged-out admin, counter loaded.
    pub async fn load(pool: &Pool<Sqlite>, analytics: &dyn Analytics) -> Self {
        analytics.track(
            analytics::PAGE_VIEW,
            event_params!("page_title" => "Resale Landing Page"),
        );

        let mut page = Self::default();
        page.refresh_count(pool).await;
        page
    }

    /// A failed count keeps the last known value.
    pub async fn refresh_count(&mut self, pool: &Pool<Sqlite>) {
        if let Ok(count) = SignupRepository::count(pool).await {
            self.total_signups = Some(count);
        }
    }

    pub async fn submit(
        &mut self,
        pool: &Pool<Sqlite>,
        analytics: &dyn Analytics,
    ) -> Result<SignupEntry, AppError> {
        let entry = self.form.submit(pool, analytics).await?;
        self.refresh_count(pool).await;
        self.submitted = true;
        Ok(entry)
    }

    /// Leave the thank-you state and start over with an empty form.
    pub fn reset(&mut self) {
        self.submitted = false;
        self.form.reset();
    }
}
