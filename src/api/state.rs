use std::sync::Arc;
use sqlx::{Pool, Sqlite};
use crate::admin::AdminGate;
use crate::analytics::Analytics;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub gate: Arc<AdminGate>,
    pub analytics: Arc<dyn Analytics>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Pool<Sqlite>, config: Arc<Config>, analytics: Arc<dyn Analytics>) -> Self {
        AppState {
            db,
            gate: Arc::new(AdminGate::new(&config.admin_email)),
            analytics,
            config,
        }
    }
}
