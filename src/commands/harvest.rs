use crate::*;
use std::time::Duration;

struct ProgressPrinter;

impl IngestObserver for ProgressPrinter {
    fn on_progress(&mut self, p: Progress) {
        eprintln!("[{}/{}] {:>3.0}%", p.processed, p.total, p.fraction * 100.0);
    }
}

pub fn handle_fetch_command(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    let Commands::Fetch {
        input,
        csrf_token,
        session_id,
        out,
        report,
        base_url,
        vendor_id,
        delay_ms,
    } = &cli.command
    else {
        unreachable!("handled before fetch")
    };

    let mut settings = settings.clone();
    if let Some(u) = base_url {
        settings.portal.base_url = u.clone();
    }
    if let Some(v) = vendor_id {
        settings.portal.vendor_id = v.clone();
    }
    if let Some(d) = delay_ms {
        settings.ingest.delay_ms = *d;
    }
    settings.validate()?;

    // Everything fatal happens before the first request.
    let column = read_document_column(input)?;
    let credentials = Credentials::new(
        credential_value(csrf_token.as_deref(), CSRF_TOKEN_ENV),
        credential_value(session_id.as_deref(), SESSION_ID_ENV),
    )?;
    let client = PortalClient::new(&settings.portal)?;
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    ctrlc::set_handler(move || on_interrupt.cancel())?;
    let options = IngestOptions {
        delay: Duration::from_millis(settings.ingest.delay_ms),
        cancel,
    };

    let ids = &column.ids;
    let ingested = if cli.json {
        ingest(ids, &credentials, &client, &options, &mut SilentObserver)
    } else {
        ingest(ids, &credentials, &client, &options, &mut ProgressPrinter)
    };

    let summary = summarize(&ingested.rows, settings.summary.top_products);
    let empty_result = ingested.rows.is_empty();
    if empty_result {
        tracing::warn!(documents = ingested.total, "no rows were collected");
    }

    if let Some(path) = out {
        write_rows_csv(path, &ingested.rows)?;
    }
    if let Some(path) = report {
        write_report_xlsx(path, &ingested.rows, &summary)?;
    }

    let fetch_report = FetchReport {
        total_documents: ingested.total,
        skipped_rows: column.blank_rows,
        processed: ingested.processed,
        cancelled: ingested.cancelled,
        empty_result,
        rows: ingested.rows,
        diagnostics: ingested.diagnostics,
        summary,
        exported_csv: out.as_ref().map(|p| p.display().to_string()),
        exported_report: report.as_ref().map(|p| p.display().to_string()),
    };
    print_one(cli.json, fetch_report, render_fetch_text)?;
    Ok(())
}

fn credential_value(flag: Option<&str>, env_key: &str) -> String {
    flag.map(str::to_string)
        .or_else(|| std::env::var(env_key).ok())
        .unwrap_or_default()
}

fn render_fetch_text(r: &FetchReport) -> String {
    let mut text = String::new();
    if r.empty_result {
        text.push_str(&format!(
            "warning: no rows were collected from {} documents\n",
            r.processed
        ));
    } else {
        text.push_str(&render_rows(&r.rows));
        text.push('\n');
        text.push_str(&render_summary(&r.summary));
    }
    if !r.diagnostics.is_empty() {
        text.push_str("\ndiagnostics:\n");
        for d in &r.diagnostics {
            text.push_str(&render_diagnostic(d));
            text.push('\n');
        }
    }
    if let Some(p) = &r.exported_csv {
        text.push_str(&format!("rows written to {}\n", p));
    }
    if let Some(p) = &r.exported_report {
        text.push_str(&format!("report written to {}\n", p));
    }
    if !r.skipped_rows.is_empty() {
        text.push_str(&format!(
            "skipped blank document ids in rows {:?}\n",
            r.skipped_rows
        ));
    }
    if r.cancelled {
        text.push_str("run cancelled before all documents were fetched\n");
    }
    text.push_str(&format!(
        "fetched {}/{} documents, {} rows, {} diagnostics",
        r.processed,
        r.total_documents,
        r.rows.len(),
        r.diagnostics.len()
    ));
    text
}
