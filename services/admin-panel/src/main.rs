use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use dotenv::dotenv;

use admin_panel::config::{self, Config};
use admin_panel::db::Gateway;
use admin_panel::error::{ConfigError, PromptError, StartupError};
use admin_panel::prompt::Console;
use admin_panel::repositories::Catalog;
use admin_panel::terminal::CrosstermKeys;

/// Terminal administration console for the game rating catalog.
#[derive(Parser, Debug)]
#[command(name = "admin-panel", version, about)]
struct Cli {
    /// Configuration file (defaults to $ADMIN_PANEL_CONFIG, then ./admin-panel.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let path = config::resolve_path(cli.config, std::env::var(config::CONFIG_ENV_VAR).ok());
    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
            report_startup_error(&StartupError::from(e), &path);
            return ExitCode::FAILURE;
        }
    };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.console.log_level));
    log::info!("using configuration from {}", path.display());

    let gateway = match start(&config) {
        Ok(gateway) => Rc::new(gateway),
        Err(e) => {
            report_startup_error(&e, &path);
            return ExitCode::FAILURE;
        }
    };

    let catalog = Catalog::postgres(gateway.clone());
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let outcome = admin_panel::run(&catalog, &mut CrosstermKeys, &mut console);

    drop(catalog);
    if let Ok(gateway) = Rc::try_unwrap(gateway) {
        gateway.close();
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(PromptError::InputClosed) => {
            eprintln!("\ninput closed, exiting");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("\n{}", e);
            ExitCode::FAILURE
        }
    }
}

fn start(config: &Config) -> Result<Gateway, StartupError> {
    let gateway = Gateway::connect(&config.database)?;
    gateway.migrate()?;
    Ok(gateway)
}

fn report_startup_error(err: &StartupError, path: &Path) {
    log::error!("startup failed: {}", err);
    eprintln!("✗ {}", err);
    match err {
        StartupError::Config(ConfigError::Missing { .. }) => {
            eprintln!("  Create {} with a [database] section, for example:", path.display());
            eprintln!();
            eprintln!("    [database]");
            eprintln!("    host = \"localhost\"");
            eprintln!("    port = 5432");
            eprintln!("    user = \"admin\"");
            eprintln!("    password = \"secret\"");
            eprintln!("    name = \"game_rating\"");
            eprintln!();
            eprintln!("  or point --config / {} at an existing file.", config::CONFIG_ENV_VAR);
        }
        StartupError::Config(_) => {
            eprintln!("  Fix the syntax or missing keys in {}.", path.display());
        }
        StartupError::Connect(_) => {
            eprintln!("  Check that PostgreSQL is running and that the [database] host, port,");
            eprintln!("  user, password and name in {} are correct.", path.display());
        }
        StartupError::Migrate(_) => {
            eprintln!("  The database user needs permission to create tables in the target database.");
        }
        StartupError::Runtime(_) => {}
    }
}
