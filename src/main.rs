use std::fmt::Display;
use std::net::SocketAddr;
use std::path::Path;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use incident_desk::config::{self, Settings, DEFAULT_HOST, DEFAULT_PORT};
use incident_desk::db::Database;
use incident_desk::models::{AppState, Role};
use incident_desk::routes::build_app;
use incident_desk::services::{ingest_csv, register_user, reset_password, seed_default_admin, set_role};

fn fail(context: &str, e: impl Display) -> ! {
    tracing::error!(%e, "{}", context);
    eprintln!("{}: {}", yansi::Paint::red(context), e);
    process::exit(1);
}

async fn open_database(env_file: Option<&str>) -> (Settings, Database) {
    config::load_env_file(env_file);
    let settings = Settings::from_env();
    match Database::connect(&settings.database_url).await {
        Ok(db) => (settings, db),
        Err(e) => fail(&format!("Failed to open database {}", settings.database_url), e),
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => fail(&format!("Failed to read custom stylesheet at {}", path), e),
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => fail("Invalid host/port format", e),
    };
    let app = build_app(state);
    tracing::info!(%addr, "Starting incident-desk server");
    println!(
        "{} {}",
        yansi::Paint::new("Web server running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                fail("Server error", e);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

async fn serve(env_file: Option<&str>, host: &str, port: u16, stylesheet: Option<String>) {
    let (settings, db) = open_database(env_file).await;
    match seed_default_admin(&db).await {
        Ok(Some(username)) => println!(
            "{} '{}' {}",
            yansi::Paint::new("Created default admin").yellow(),
            username,
            yansi::Paint::new("- change its password with `incident-desk users reset-password`").yellow()
        ),
        Ok(None) => {}
        Err(e) => fail("Failed to seed default admin", e),
    }
    start_server(AppState::new(db, settings), host, port, stylesheet).await;
}

fn parse_role(raw: &str) -> Role {
    match raw.parse() {
        Ok(role) => role,
        Err(e) => fail("Invalid role", e),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

async fn import_file(db: &Database, path: &Path, reported_by: Option<String>) {
    let reporter_id = match reported_by {
        Some(username) => match db.get_user_by_username(&username.trim().to_lowercase()).await {
            Ok(Some(user)) => Some(user.id),
            Ok(None) => fail("Unknown user", username),
            Err(e) => fail("Failed to look up user", e),
        },
        None => None,
    };
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) => fail(&format!("Failed to read {}", path.display()), e),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Importing {}", file_name));
    pb.enable_steady_tick(Duration::from_millis(100));
    let outcome = ingest_csv(db, &file_name, &bytes, reporter_id).await;
    pb.finish_and_clear();

    match outcome {
        Ok(inserted) => println!(
            "{} {} {}",
            yansi::Paint::new("Imported").green(),
            inserted,
            yansi::Paint::new("incidents").green()
        ),
        Err(e) => fail("Import failed", e),
    }
}

#[derive(Parser)]
#[command(
    name = "incident-desk",
    author,
    version,
    about = "Maintenance incident tracker",
    long_about = r#"incident-desk: upload, search and report on maintenance incidents.

Runs the web application and provides admin tooling for local users,
notifications and offline CSV imports. Configuration comes from environment
variables or an `.env` file (DATABASE_URL, PDF_FONT_DIR, PDF_FONT_NAME,
DASHBOARD_LEGACY_MONTH_KEYS, DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).

Examples:
  1) Run the server:
      incident-desk serve --host 127.0.0.1 --port 8080
  2) Add an engineer:
      incident-desk users add alice s3cret engineer
  3) Import a file without the web UI:
      incident-desk import incidents.csv --reported-by alice
"#,
    after_help = "Use `incident-desk <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Manage users stored in the database
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
    /// Manage the notification feed
    Notifications {
        #[command(subcommand)]
        sub: NotificationCommands,
    },
    /// Import incidents from a CSV file
    #[command(long_about = "Parse and store a CSV file exactly as the upload page does. Nothing is stored if any row is invalid.")]
    Import {
        path: String,
        /// Username recorded as the reporter of the imported incidents
        #[arg(long)]
        reported_by: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(about = "List users", long_about = "Show every user with its role and creation time.")]
    List,
    #[command(about = "Add a new user", long_about = "Add a user with a role (admin|engineer|viewer). The password is stored as a pbkdf2-sha256 hash.")]
    Add {
        username: String,
        password: String,
        role: String,
    },
    #[command(about = "Reset a user's password", long_about = "Set a new password for an existing user; password will be hashed.")]
    ResetPassword {
        username: String,
        password: String,
    },
    #[command(about = "Change a user's role", long_about = "Change the role of an existing user. Signed-in sessions keep their old role until the next login.")]
    SetRole {
        username: String,
        role: String,
    },
}

#[derive(Subcommand)]
enum NotificationCommands {
    /// Add a notification shown on the notifications page
    Add { message: String },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    let env_file = cli.env_file.as_deref();
    let Some(command) = cli.command else {
        serve(env_file, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    match command {
        Commands::Serve { host, port, stylesheet } => {
            serve(env_file, &host, port, stylesheet).await;
        }
        Commands::Users { sub } => {
            let (_, db) = open_database(env_file).await;
            match sub {
                UserCommands::List => {
                    let users = match db.list_users().await {
                        Ok(u) => u,
                        Err(e) => fail("Failed to list users", e),
                    };
                    if users.is_empty() {
                        println!("(no users)");
                        return;
                    }
                    let mut table = new_table();
                    table.set_header(vec!["ID", "Username", "Role", "Created"]);
                    for u in &users {
                        table.add_row(vec![
                            u.id.to_string(),
                            u.username.clone(),
                            u.role().to_string(),
                            u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        ]);
                    }
                    println!("\n{table}\n");
                }
                UserCommands::Add { username, password, role } => {
                    let role = parse_role(&role);
                    match register_user(&db, &username, &password, role).await {
                        Ok(user) => println!(
                            "{} '{}' {} {}",
                            yansi::Paint::new("User").green(),
                            user.username,
                            yansi::Paint::new("added as").green(),
                            role
                        ),
                        Err(e) => fail("Failed to add user", e),
                    }
                }
                UserCommands::ResetPassword { username, password } => match reset_password(&db, &username, &password).await {
                    Ok(()) => println!(
                        "{} '{}' {}",
                        yansi::Paint::new("Password for").green(),
                        username.trim().to_lowercase(),
                        yansi::Paint::new("updated").green()
                    ),
                    Err(e) => fail("Failed to reset password", e),
                },
                UserCommands::SetRole { username, role } => {
                    let role = parse_role(&role);
                    match set_role(&db, &username, role).await {
                        Ok(()) => println!(
                            "{} '{}' {} {}",
                            yansi::Paint::new("User").green(),
                            username.trim().to_lowercase(),
                            yansi::Paint::new("is now").green(),
                            role
                        ),
                        Err(e) => fail("Failed to change role", e),
                    }
                }
            }
        }
        Commands::Notifications { sub } => {
            let (_, db) = open_database(env_file).await;
            match sub {
                NotificationCommands::Add { message } => {
                    if message.trim().is_empty() {
                        fail("Invalid notification", "message must not be empty");
                    }
                    match db.create_notification(message.trim()).await {
                        Ok(n) => println!("{} #{}", yansi::Paint::new("Notification added").green(), n.id),
                        Err(e) => fail("Failed to add notification", e),
                    }
                }
            }
        }
        Commands::Import { path, reported_by } => {
            let (_, db) = open_database(env_file).await;
            import_file(&db, Path::new(&path), reported_by).await;
        }
    }
}
