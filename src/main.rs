use clap::Parser;

mod cli;
mod commands;
mod domain;
mod portal;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::models::*;
pub use portal::*;
pub use services::export::*;
pub use services::extract::*;
pub use services::ingest::*;
pub use services::input::*;
pub use services::output::*;
pub use services::settings::*;
pub use services::summary::*;

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        print_error(cli.json, error_code(&e), &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli.config.as_deref())?;

    if handle_inspect_commands(cli, &settings)? {
        return Ok(());
    }
    handle_fetch_command(cli, &settings)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PO_HARVEST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn error_code(e: &anyhow::Error) -> &'static str {
    if let Some(e) = e.downcast_ref::<InputError>() {
        return match e {
            InputError::MissingColumn { .. } => "MISSING_COLUMN",
            _ => "INPUT_UNREADABLE",
        };
    }
    if let Some(e) = e.downcast_ref::<PortalError>() {
        return match e {
            PortalError::EmptyCredential(_) | PortalError::InvalidCredential(_) => {
                "INVALID_CREDENTIALS"
            }
            _ => "PORTAL_SETUP",
        };
    }
    if e.downcast_ref::<SettingsError>().is_some() {
        return "INVALID_SETTINGS";
    }
    if e.downcast_ref::<ExportError>().is_some() {
        return "EXPORT_FAILED";
    }
    "ERROR"
}
