use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;

use shoplist::App;
use shoplist::backend::{BackendClient, MemoryBackend, ParseClient};
use shoplist::config::{self, Config, ConfigResult};
use shoplist::error::ShoplistError;
use shoplist::session::session_storage;
use shoplist::worker;

/// Shared shopping lists in the terminal
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Terminal shopping list tracker backed by a Parse-compatible backend"
)]
struct Args {
    /// Config file (default: ~/.config/shoplist/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use an in-process demo backend (log in as demo@example.com / demo)
    #[arg(long)]
    offline: bool,

    /// Print the resolved backend settings and exit
    #[arg(long)]
    check_config: bool,
}

fn main() -> Result<()> {
    // Writes to $TMPDIR/shoplist-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    init_debug_log()?;

    color_eyre::install()?;

    let args = Args::parse();
    let config_result = config::load_config(args.config.as_deref())?;

    if args.check_config {
        return check_config(&config_result);
    }

    let (client, session_path, fallback_warning) = select_backend(&args, &config_result.config);

    let terminal = init_terminal()?;

    let mut app = App::new(&config_result.config, session_path);
    for warning in [config_result.warning, fallback_warning].into_iter().flatten() {
        app.notification.show_warning(&warning);
    }

    let result = run(terminal, app, client);

    restore_terminal()?;
    result?;

    #[cfg(debug_assertions)]
    log::debug!("=== SHOPLIST DEBUG SESSION ENDED ===");

    Ok(())
}

#[cfg(debug_assertions)]
fn init_debug_log() -> Result<(), ShoplistError> {
    use std::io::Write;

    let path = std::env::temp_dir().join("shoplist-debug.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== SHOPLIST DEBUG SESSION STARTED ===");
    Ok(())
}

/// The configured backend, or the demo backend when running offline or
/// unconfigured. Offline sessions are never written to disk.
fn select_backend(args: &Args, config: &Config) -> (BackendClient, Option<PathBuf>, Option<String>) {
    if args.offline {
        return (BackendClient::Memory(MemoryBackend::demo()), None, None);
    }

    match ParseClient::from_config(&config.backend, &config.suggestions) {
        Ok(client) => (
            BackendClient::Parse(client),
            session_storage::session_path(),
            None,
        ),
        Err(e) => {
            log::warn!("{}", e);
            (
                BackendClient::Memory(MemoryBackend::demo()),
                None,
                Some(
                    "Backend not configured. Running offline with demo data (demo@example.com / demo)."
                        .to_string(),
                ),
            )
        }
    }
}

fn check_config(config_result: &ConfigResult) -> Result<()> {
    let backend = &config_result.config.backend;
    let suggestions = &config_result.config.suggestions;
    let unset = || "(not set)".to_string();

    if let Some(warning) = &config_result.warning {
        eprintln!("warning: {}", warning);
    }
    println!("config file:    {}", config::get_config_path().display());
    println!("server_url:     {}", backend.server_url.clone().unwrap_or_else(unset));
    println!("app_id:         {}", backend.app_id.clone().unwrap_or_else(unset));
    println!(
        "javascript_key: {}",
        if backend.javascript_key.is_some() { "(set)" } else { "(not set)" }
    );
    println!("list_class:     {}", backend.list_class);
    println!(
        "suggestions:    {} ({}.{}, {} ms, max {})",
        if suggestions.enabled { "on" } else { "off" },
        suggestions.class_name,
        suggestions.field,
        suggestions.debounce_ms,
        suggestions.max_results
    );

    if !backend.is_configured() {
        return Err(ShoplistError::BackendNotConfigured.into());
    }
    Ok(())
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App, client: BackendClient) -> Result<()> {
    log::info!("using {} backend", client.name());
    let (request_tx, response_rx) = worker::start(client);
    app.set_channels(request_tx, response_rx);
    app.start();

    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
