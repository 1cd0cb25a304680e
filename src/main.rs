use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use retrace::config::{ConfigError, KeyBindings};
use retrace::{core::demo, ui, util, App, Config, RunReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retrace")]
#[command(about = "Record a live session, then replay it deterministically")]
#[command(
    long_about = r#"Record a live session, then replay it deterministically

USAGE:
  retrace                        # Record on the terminal, then replay it
  retrace demo                   # Headless scripted record/replay cycle
  retrace config init            # Create config file
  retrace config show            # Show effective config

Move with WASD or the arrow keys, halt with Space, quit with q or Esc."#
)]
#[command(version)]
struct Cli {
    /// Path to the configuration file (default: ~/.retrace/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for logs and config (default: ~/.retrace)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Stop recording after this many ticks (0 for no limit)
    #[arg(long, global = true)]
    max_ticks: Option<u64>,

    /// Live tick rate in Hz
    #[arg(long, global = true)]
    tick_rate: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record on the terminal, then replay the recording (default)
    Run,

    /// Run the scripted three-tick scenario with the default key bindings,
    /// without a terminal
    Demo {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the example config unless one exists
    Init,
}

fn init_logging(level: &str) -> Result<()> {
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(max) = cli.max_ticks {
        config.max_ticks = (max > 0).then_some(max);
    }
    if let Some(hz) = cli.tick_rate {
        config.tick_rate_hz = hz.max(1);
    }
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    let config_path = cli.config.clone().unwrap_or_else(util::config_path);
    let loaded: Result<Config, ConfigError> = Config::load_from_path(&config_path);
    let level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| Config::default().log_level);
    init_logging(&level)?;

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!(
            path = %config_path.display(),
            error = %e,
            "Failed to load config, using defaults"
        );
        Config::default()
    });
    apply_overrides(&mut config, &cli);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            ui::install_panic_hook();
            let report = App::new(config).run()?;
            print_report(&report, false)?;
        }
        Commands::Demo { json } => {
            let report = demo::run_demo(KeyBindings::default())?;
            print_report(&report, json)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => println!("{}", config_path.display()),
            ConfigAction::Show => print!("{}", config.describe()),
            ConfigAction::Init => {
                if Config::write_example(&config_path)? {
                    println!("Wrote {}", config_path.display());
                } else {
                    println!("{} already exists", config_path.display());
                }
            }
        },
    }
    Ok(())
}
