use crate::*;

pub fn handle_inspect_commands(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Ids { input } => {
            let column = read_document_column(input)?;
            let list = DocumentList {
                source: input.display().to_string(),
                count: column.ids.len(),
                document_ids: column.ids,
                skipped_rows: column.blank_rows,
            };
            print_one(cli.json, list, |l| l.document_ids.join("\n"))?;
        }
        Commands::Summarize { rows, report } => {
            let table = read_rows_csv(rows)?;
            let summary = summarize(&table, settings.summary.top_products);
            if let Some(path) = report {
                write_report_xlsx(path, &table, &summary)?;
            }
            let out = SummarizeReport {
                source: rows.display().to_string(),
                row_count: table.len(),
                summary,
                exported_report: report.as_ref().map(|p| p.display().to_string()),
            };
            print_one(cli.json, out, |r| {
                let mut text = format!("{} rows from {}\n", r.row_count, r.source);
                text.push_str(&render_summary(&r.summary));
                if let Some(p) = &r.exported_report {
                    text.push_str(&format!("report written to {}\n", p));
                }
                text.trim_end().to_string()
            })?;
        }
        Commands::Config => {
            let path = cli
                .config
                .clone()
                .or_else(default_settings_path)
                .map(|p| p.display().to_string());
            let text = format!(
                "# settings file: {}\n{}",
                path.as_deref().unwrap_or("n/a"),
                toml::to_string_pretty(settings)?
            );
            print_one(
                cli.json,
                serde_json::json!({"path": path, "settings": settings}),
                |_| text.trim_end().to_string(),
            )?;
        }
        Commands::Fetch { .. } => return Ok(false),
    }
    Ok(true)
}
