//! pgtop - top-like live monitor for PostgreSQL.
//!
//! Usage:
//!   pgtop                       # local server, 1 second interval
//!   pgtop 5                     # 5 second interval
//!   pgtop -h db1 -U app -d app  # remote server (OS stats via helper schema)
//!   pgtop --view activity --min-age 00:05:00

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tikv_jemallocator::Jemalloc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pgtop::collector::{OsSources, RealFs};
use pgtop::config::{Config, DEFAULT_TICKS_PER_SECOND, View};
use pgtop::connection::{ConnectParams, PgConnection, SslMode};
use pgtop::tui::App;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Top-like live monitor for PostgreSQL.
#[derive(Parser)]
#[command(name = "pgtop", version, about = "PostgreSQL live monitor", disable_help_flag = true)]
struct Args {
    /// Refresh interval in seconds.
    #[arg(value_name = "INTERVAL", default_value_t = 1)]
    interval: u64,

    /// Database server host or socket directory.
    #[arg(short = 'h', long, env = "PGHOST", default_value = "/var/run/postgresql")]
    host: String,

    #[arg(short = 'p', long, env = "PGPORT", default_value_t = 5432)]
    port: u16,

    #[arg(short = 'U', long, env = "PGUSER", default_value = "postgres")]
    user: String,

    /// Database to connect to (defaults to the user name).
    #[arg(short = 'd', long, env = "PGDATABASE")]
    dbname: Option<String>,

    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long, value_enum, default_value = "prefer")]
    sslmode: SslMode,

    /// Path to the /proc filesystem, for a local server.
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Hide sessions younger than this in the activity view (HH:MM:SS).
    #[arg(long, value_name = "HH:MM:SS")]
    min_age: Option<String>,

    /// Statistics view shown at startup.
    #[arg(long, value_enum, default_value = "databases")]
    view: View,

    /// Kernel clock ticks per second (USER_HZ).
    #[arg(long, default_value_t = DEFAULT_TICKS_PER_SECOND)]
    ticks: f64,

    /// Write logs to this file; the terminal belongs to the UI.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_config(args: &Args) -> Result<Config, String> {
    if args.interval == 0 {
        return Err("interval must be at least 1 second".to_string());
    }
    if args.ticks <= 0.0 {
        return Err("--ticks must be positive".to_string());
    }
    let mut config = Config::default();
    config.view = args.view;
    config.interval = Duration::from_secs(args.interval);
    config.ticks_per_second = args.ticks;
    if let Some(age) = &args.min_age {
        config.query.set_min_age(age).map_err(|e| e.to_string())?;
    }
    Ok(config)
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.log_file.as_ref()) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let params = ConnectParams {
        host: args.host.clone(),
        port: args.port,
        user: args.user.clone(),
        password: args.password.clone(),
        dbname: args.dbname.clone().unwrap_or_else(|| args.user.clone()),
        sslmode: args.sslmode,
    };

    let conn = match PgConnection::connect(&params) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let os = if params.is_local() {
        OsSources::local(RealFs::new(), &args.proc_path, config.ticks_per_second)
    } else {
        info!(host = %params.host, "remote server, OS statistics read via helper schema");
        OsSources::remote(config.ticks_per_second)
    };

    let app = App::new(Box::new(conn), config, os);
    if let Err(e) = app.run() {
        error!(error = %e, "monitor failed");
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
