use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::Settings;
use crate::db::Database;
use crate::models::current_user::CurrentUser;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Session id → identity captured at login.
    pub sessions: Arc<Mutex<HashMap<String, CurrentUser>>>,
    /// Session id → messages shown on the next rendered page.
    pub flash_store: Arc<Mutex<HashMap<String, Vec<String>>>>,
    pub settings: Settings,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        Self {
            db,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            flash_store: Arc::new(Mutex::new(HashMap::new())),
            settings,
            custom_css: None,
        }
    }
}
