use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://incidents.db";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;
pub const DEFAULT_PDF_FONT_DIR: &str = "/usr/share/fonts/truetype/liberation";
pub const DEFAULT_PDF_FONT_NAME: &str = "LiberationSans";

/// Number of notifications shown on the listing page.
pub const NOTIFICATIONS_LIMIT: i64 = 20;
/// Number of incidents shown in the dashboard "recent" panel.
pub const RECENT_INCIDENTS_LIMIT: usize = 5;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_database_url() -> String {
    sanitize_database_url(&env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()))
}

pub fn get_default_admin_username() -> String {
    env::var("DEFAULT_ADMIN_USERNAME")
        .ok()
        .map(|u| u.trim().to_lowercase())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string())
}

pub fn get_default_admin_password() -> String {
    env::var("DEFAULT_ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string())
}

pub fn get_pdf_font_dir() -> String {
    env::var("PDF_FONT_DIR").unwrap_or_else(|_| DEFAULT_PDF_FONT_DIR.to_string())
}

pub fn get_pdf_font_name() -> String {
    env::var("PDF_FONT_NAME").unwrap_or_else(|_| DEFAULT_PDF_FONT_NAME.to_string())
}

/// Whether the dashboard trend also counts each incident under its `%x-%m` key.
pub fn get_legacy_month_keys() -> bool {
    env::var("DASHBOARD_LEGACY_MONTH_KEYS")
        .map(|v| parse_bool_flag(&v, true))
        .unwrap_or(true)
}

pub fn parse_bool_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Accepts bare file paths as well as `sqlite:` URLs.
pub fn sanitize_database_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_DATABASE_URL.to_string()
    } else if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else {
        format!("sqlite://{}", trimmed)
    }
}

/// Settings shared by every request, resolved once at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub pdf_font_dir: String,
    pub pdf_font_name: String,
    pub legacy_month_keys: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            database_url: get_database_url(),
            pdf_font_dir: get_pdf_font_dir(),
            pdf_font_name: get_pdf_font_name(),
            legacy_month_keys: get_legacy_month_keys(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            pdf_font_dir: DEFAULT_PDF_FONT_DIR.to_string(),
            pdf_font_name: DEFAULT_PDF_FONT_NAME.to_string(),
            legacy_month_keys: true,
        }
    }
}
