use sqlx::{Pool, Sqlite};

use crate::analytics::{self, Analytics};
use crate::db::models::{SignupDraft, SignupEntry, UserType};
use crate::db::SignupRepository;
use crate::error::{AppError, SUBMIT_FAILED_MESSAGE};
use crate::event_params;
use crate::validation::{self, Field, FieldErrors};

/// The signup form while it is being filled in.
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    pub draft: SignupDraft,
    pub errors: FieldErrors,
    /// Set when the last submit reached the store and failed.
    pub submit_error: Option<&'static str>,
    submitting: bool,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from already-typed input, e.g. a JSON request body.
    pub fn from_draft(draft: SignupDraft) -> Self {
        FormDraft {
            draft,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Update one field. Any error recorded for that field is cleared.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.draft.name = value.to_string(),
            Field::Email => self.draft.email = value.to_string(),
            Field::Phone => self.draft.phone = value.to_string(),
            Field::Reason => self.draft.reason = value.to_string(),
            Field::UserType => match value.parse() {
                Ok(user_type) => self.draft.user_type = user_type,
                Err(_) => return,
            },
        }
        self.errors.remove(field);
    }

    pub fn set_user_type(&mut self, user_type: UserType) {
        self.draft.user_type = user_type;
        self.errors.remove(Field::UserType);
    }

    /// Back to an empty buyer form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate, then store. On validation failure the store is never
    /// touched. On store failure the draft is kept so the visitor can
    /// resubmit as is.
    pub async fn submit(
        &mut self,
        pool: &Pool<Sqlite>,
        analytics: &dyn Analytics,
    ) -> Result<SignupEntry, AppError> {
        if self.submitting {
            return Err(AppError::SubmitInProgress);
        }

        self.submit_error = None;
        self.errors = validation::validate(&self.draft);
        if !self.errors.is_empty() {
            analytics.track(
                analytics::FORM_VALIDATION_FAILED,
                event_params!("errors" => self.errors.field_names()),
            );
            return Err(AppError::Validation(self.errors.clone()));
        }

        self.submitting = true;
        let result = SignupRepository::insert(pool, self.draft.to_new_signup()).await;
        self.submitting = false;

        match result {
            Ok(entry) => {
                analytics.track(
                    analytics::WAITLIST_SIGNUP,
                    event_params!(
                        "user_type" => self.draft.user_type.as_str(),
                        "has_reason" => !self.draft.reason.is_empty(),
                    ),
                );
                self.reset();
                Ok(entry)
            }
            Err(err) => {
                self.submit_error = Some(SUBMIT_FAILED_MESSAGE);
                analytics.track(
                    analytics::SIGNUP_ERROR,
                    event_params!("error" => err.to_string()),
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingAnalytics;
    use crate::analytics::NoopAnalytics;
    use crate::db::test_pool;

    fn filled() -> FormDraft {
        let mut form = FormDraft::new();
        form.set_field(Field::Name, "Ada Lovelace");
        form.set_field(Field::Email, "ada@x.com");
        form.set_field(Field::Phone, "08012345678");
        form.set_user_type(UserType::Seller);
        form
    }

    #[test]
    fn test_new_form_is_empty_buyer() {
        let form = FormDraft::new();
        assert_eq!(form.draft.user_type, UserType::Buyer);
        assert!(form.draft.name.is_empty());
        assert!(form.errors.is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_user_type_field_only_accepts_known_values() {
        let mut form = FormDraft::new();
        form.set_field(Field::UserType, "seller");
        assert_eq!(form.draft.user_type, UserType::Seller);

        form.set_field(Field::UserType, "Seller");
        assert_eq!(form.draft.user_type, UserType::Seller);
        form.set_field(Field::UserType, "broker");
        assert_eq!(form.draft.user_type, UserType::Seller);

        form.set_field(Field::UserType, "buyer");
        assert_eq!(form.draft.user_type, UserType::Buyer);
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_store_untouched() {
        let pool = test_pool().await;
        let analytics = RecordingAnalytics::default();
        let mut form = FormDraft::new();
        form.set_field(Field::Name, "A");

        let err = form.submit(&pool, &analytics).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(form.errors.contains(Field::Name));
        assert!(form.errors.contains(Field::Email));
        assert_eq!(SignupRepository::count(&pool).await.unwrap(), 0);
        assert_eq!(analytics.names(), vec![analytics::FORM_VALIDATION_FAILED]);
    }

    #[tokio::test]
    async fn test_editing_a_field_clears_only_its_error() {
        let pool = test_pool().await;
        let mut form = FormDraft::new();
        let _ = form.submit(&pool, &NoopAnalytics).await;
        assert_eq!(form.errors.len(), 3);

        form.set_field(Field::Email, "ada@x.com");
        assert!(!form.errors.contains(Field::Email));
        assert!(form.errors.contains(Field::Name));
        assert!(form.errors.contains(Field::Phone));
    }

    #[tokio::test]
    async fn test_successful_submit_clears_draft() {
        let pool = test_pool().await;
        let analytics = RecordingAnalytics::default();
        let mut form = filled();

        let entry = form.submit(&pool, &analytics).await.unwrap();
        assert_eq!(entry.name, "Ada Lovelace");
        assert_eq!(entry.user_type, UserType::Seller);
        assert_eq!(entry.reason, None);
        assert!(form.draft.name.is_empty());
        assert_eq!(form.draft.user_type, UserType::Buyer);

        let (name, params) = analytics.last().unwrap();
        assert_eq!(name, analytics::WAITLIST_SIGNUP);
        assert_eq!(params["user_type"], "seller");
        assert_eq!(params["has_reason"], false);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let pool = test_pool().await;
        pool.close().await;
        let analytics = RecordingAnalytics::default();
        let mut form = filled();

        let err = form.submit(&pool, &analytics).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(form.draft.name, "Ada Lovelace");
        assert_eq!(form.submit_error, Some(SUBMIT_FAILED_MESSAGE));
        assert!(!form.is_submitting());
        assert_eq!(analytics.names(), vec![analytics::SIGNUP_ERROR]);
    }

    #[tokio::test]
    async fn test_submit_refused_while_in_flight() {
        let pool = test_pool().await;
        let mut form = filled();
        form.submitting = true;

        let err = form.submit(&pool, &NoopAnalytics).await.unwrap_err();
        assert!(matches!(err, AppError::SubmitInProgress));
        assert_eq!(SignupRepository::count(&pool).await.unwrap(), 0);
    }
}
