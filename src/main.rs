mod app;
mod bookmarks;
mod catalog;
mod config;
mod constants;
mod detail;
mod display;
mod input;
mod media;
mod poster;
mod results;
mod theme;
mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use directories::ProjectDirs;
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use bookmarks::FileStore;
use config::Config;
use display::{CliDisplayMode, DisplayMode};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Browse trending movies and shows, search TMDB, and keep bookmarks — in the terminal.", long_about = None)]
struct Args {
  /// TMDB API key (falls back to $TMDB_API_KEY, then the prefs file)
  #[arg(short, long)]
  api_key: Option<String>,

  /// Display mode for backdrop images: 'auto', 'direct', or 'ascii'
  #[arg(short, long, default_value = "auto")]
  display_mode: CliDisplayMode,
}

/// Resolve the API key: CLI flag > environment > prefs file.
fn resolve_api_key(args: &Args, config: &Config) -> Result<String> {
  if let Some(ref key) = args.api_key {
    return Ok(key.clone());
  }
  if let Ok(key) = std::env::var("TMDB_API_KEY")
    && !key.is_empty()
  {
    return Ok(key);
  }
  if let Some(ref key) = config.api_key
    && !key.is_empty()
  {
    return Ok(key.clone());
  }
  bail!(
    "No TMDB API key found. Pass --api-key, set TMDB_API_KEY, or add \
     `api_key = \"...\"` to the prefs file. Free keys: https://www.themoviedb.org/settings/api"
  );
}

/// Log to a file under the data dir — the TUI owns stdout.
/// Returns the guard that flushes the non-blocking writer on drop.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
  let proj_dirs = ProjectDirs::from("", "", "movievault")?;
  let log_dir = proj_dirs.data_dir().join("logs");
  std::fs::create_dir_all(&log_dir).ok()?;

  let appender = tracing_appender::rolling::never(log_dir, "movievault.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movievault=info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();
  Some(guard)
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let _log_guard = init_logging();

  let config = Config::load();
  let api_key = resolve_api_key(&args, &config)?;
  let display_mode = match args.display_mode {
    CliDisplayMode::Auto => {
      config.display_mode.as_deref().and_then(DisplayMode::from_config).unwrap_or_else(display::detect_display_mode)
    }
    other => display::resolve_display_mode(other),
  };
  info!(?display_mode, "starting");

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, api_key, display_mode).await;
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, api_key: String, display_mode: DisplayMode) -> Result<()> {
  let mut app = App::new(api_key, display_mode, Box::new(FileStore));
  app.show_trending();

  loop {
    app.check_pending();

    terminal.draw(|frame| ui::ui(frame, &mut app)).context("failed to draw frame")?;

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key);
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  Ok(())
}
