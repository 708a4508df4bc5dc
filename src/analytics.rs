//! Fire-and-forget analytics events.
//!
//! A missing sink must never change behaviour, so `track` has no return
//! value and sinks swallow their own failures.

use serde_json::{Map, Value};

pub const PAGE_VIEW: &str = "page_view";
pub const FORM_VALIDATION_FAILED: &str = "form_validation_failed";
pub const WAITLIST_SIGNUP: &str = "waitlist_signup";
pub const SIGNUP_ERROR: &str = "signup_error";
pub const EXPORT_SIGNUPS: &str = "export_signups";
pub const ADMIN_LOGIN_SUCCESS: &str = "admin_login_success";
pub const ADMIN_LOGIN_FAILED: &str = "admin_login_failed";

/// Flat key-value event parameters.
pub type EventParams = Map<String, Value>;

pub trait Analytics: Send + Sync {
    fn track(&self, event: &str, params: EventParams);
}

/// Used when no analytics backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track(&self, _event: &str, _params: EventParams) {}
}

/// Emits every event as a structured `tracing` record under the
/// `analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: &str, params: EventParams) {
        let params = Value::Object(params);
        tracing::info!(target: "analytics", event, params = %params, "Event tracked");
    }
}

/// Build an `EventParams` map from `key => value` pairs.
#[macro_export]
macro_rules! event_params {
    () => {
        $crate::analytics::EventParams::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::analytics::EventParams::new();
        $(params.insert($key.to_string(), serde_json::json!($value));)+
        params
    }};
}
