use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use newsbrief::api::ApiClient;
use newsbrief::app::{App, AppEvent};
use newsbrief::config::Config;
use newsbrief::settings::SettingsStore;
use newsbrief::theme::ThemeVariant;
use newsbrief::ui;

/// Get the config directory path (~/.config/newsbrief/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsbrief"))
}

/// Initialize tracing. Raw-mode terminals can't take stderr output, so when
/// NEWSBRIEF_LOG names a file, logs append there instead.
fn init_tracing() -> Result<()> {
    match std::env::var("NEWSBRIEF_LOG") {
        Ok(path) if !path.trim().is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "newsbrief",
    about = "Terminal client for a NewsBrief news aggregation server"
)]
struct Args {
    /// Server base URL (overrides config.toml)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Delete saved filter and theme settings before starting
    #[arg(long)]
    reset_settings: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access on Unix: the settings records are private state.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let config = Config::load(&config_dir.join("config.toml"))
        .context("Failed to load config.toml")?;

    let store = SettingsStore::new(&config_dir);

    // Handle --reset-settings flag
    if args.reset_settings {
        store.reset().context("Failed to reset settings")?;
        println!("Settings reset.");
    }

    // Filter settings: missing or corrupt records mean "no settings yet".
    let filters = store.load_filters();

    // Theme preference overrides the config default; both fall back to dark.
    let theme = ThemeVariant::from_str_name(&store.load_theme().variant)
        .or_else(|| ThemeVariant::from_str_name(&config.theme))
        .unwrap_or(ThemeVariant::Dark);

    let server_url = args.server.as_deref().unwrap_or(&config.server_url);
    let api = ApiClient::new(server_url, Duration::from_secs(config.request_timeout_secs))
        .with_context(|| format!("Cannot use '{}' as the server URL", server_url))?;

    tracing::info!(server = %server_url, "Starting newsbrief");

    // Create app state
    let mut app = App::new(api, store, filters, theme);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
