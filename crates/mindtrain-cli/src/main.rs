use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mindtrain", version, about = "Guided attention training sessions")]
struct Cli {
    /// Config file to use instead of ~/.config/mindtrain/config.toml
    #[arg(long, global = true, env = "MINDTRAIN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run or simulate a training session
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// List the focus exercises
    Exercises,
    /// Answer the knowledge quiz
    Quiz(commands::quiz::QuizArgs),
    /// Show the streak calendar for a month
    Calendar(commands::calendar::CalendarArgs),
    /// Weekly training statistics
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_env("MINDTRAIN_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match cli.config {
        Some(path) => path,
        None => mindtrain_core::Config::default_path()?,
    };
    let config = commands::load_config(&config_path)?;
    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Session { action } => commands::session::run(action, &config),
        Commands::Exercises => commands::exercises::run(),
        Commands::Quiz(args) => commands::quiz::run(args),
        Commands::Calendar(args) => commands::calendar::run(args),
        Commands::Stats => commands::stats::run(),
        Commands::Config { action } => commands::config::run(action, config, &config_path),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
