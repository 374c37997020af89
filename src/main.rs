mod api;
mod app;
mod commands;
mod config;
mod event;
mod logging;
mod query;
mod resolver;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "demodash")]
#[command(about = "A terminal dashboard for demo REST APIs (users & posts)")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/demodash/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base URL of the API (overrides config)
  #[arg(short, long)]
  api_url: Option<String>,

  /// Collection to open at startup
  #[arg(long, value_enum, default_value = "users")]
  view: app::StartView,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let _log_guard = logging::init()?;

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Override API URL if specified on command line
  if let Some(url) = args.api_url {
    config.api.url = url;
  }

  // Initialize and run the app
  let mut app = app::App::new(config, args.view)?;
  app.run().await?;

  Ok(())
}
