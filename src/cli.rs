use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const CSRF_TOKEN_ENV: &str = "PO_HARVEST_CSRF_TOKEN";
pub const SESSION_ID_ENV: &str = "PO_HARVEST_SESSION_ID";

#[derive(Parser, Debug)]
#[command(
    name = "po-harvest",
    version,
    about = "Fetch purchase-order lines from the vendor portal and summarize them"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Settings file (default: ~/.config/po-harvest/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read document ids, fetch every document and summarize the lines.
    Fetch {
        /// Workbook with a "No. Dokumen" column
        input: PathBuf,
        #[arg(long, help = "csrftoken cookie value (or PO_HARVEST_CSRF_TOKEN)")]
        csrf_token: Option<String>,
        #[arg(long, help = "sessionid cookie value (or PO_HARVEST_SESSION_ID)")]
        session_id: Option<String>,
        #[arg(long, help = "Write the collected rows as CSV")]
        out: Option<PathBuf>,
        #[arg(long, help = "Write rows, summaries and charts as an xlsx report")]
        report: Option<PathBuf>,
        #[arg(long, help = "Override portal.base_url")]
        base_url: Option<String>,
        #[arg(long, help = "Override portal.vendor_id (the `u` parameter)")]
        vendor_id: Option<String>,
        #[arg(long, help = "Override ingest.delay_ms")]
        delay_ms: Option<u64>,
    },
    /// List the document ids a fetch would use, without touching the network.
    Ids {
        input: PathBuf,
    },
    /// Recompute the summaries from a CSV written by `fetch --out`.
    Summarize {
        rows: PathBuf,
        #[arg(long, help = "Write rows, summaries and charts as an xlsx report")]
        report: Option<PathBuf>,
    },
    /// Show the effective settings.
    Config,
}
