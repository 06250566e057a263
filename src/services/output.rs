use crate::domain::models::{
    Diagnostic, ErrorBody, JsonErr, JsonOut, RowRecord, Severity, Summary,
};
use serde::Serialize;

const BAR_WIDTH: usize = 30;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn print_error(json: bool, code: &str, message: &str) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {}", message),
        }
    } else {
        eprintln!("error: {}", message);
    }
}

/// Quantities are usually whole units; drop the fraction when there is none.
pub fn format_qty(q: f64) -> String {
    if q.fract() == 0.0 && q.abs() < 1e15 {
        format!("{}", q as i64)
    } else {
        format!("{}", q)
    }
}

pub fn render_rows(rows: &[RowRecord]) -> String {
    let mut out = String::new();
    out.push_str("Tanggal PO\tNo PO\tDistribution Center\tProduct Name\tQty\n");
    for r in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            r.po_date,
            r.po_number,
            r.distribution_center,
            r.product_name,
            format_qty(r.quantity)
        ));
    }
    out
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Top {} products by total qty\n",
        summary.top_products.len()
    ));
    let width = summary
        .top_products
        .iter()
        .map(|p| p.product_name.chars().count())
        .max()
        .unwrap_or(0);
    let max = summary
        .top_products
        .first()
        .map(|p| p.total_quantity)
        .unwrap_or(0.0);
    for p in &summary.top_products {
        out.push_str(&format!(
            "  {:<width$}  {:>10}  {}\n",
            p.product_name,
            format_qty(p.total_quantity),
            bar(p.total_quantity, max),
            width = width
        ));
    }

    out.push_str("PO count per distribution center\n");
    let width = summary
        .po_per_distribution_center
        .iter()
        .map(|c| c.distribution_center.chars().count())
        .max()
        .unwrap_or(0);
    let max = summary
        .po_per_distribution_center
        .first()
        .map(|c| c.po_count as f64)
        .unwrap_or(0.0);
    for c in &summary.po_per_distribution_center {
        out.push_str(&format!(
            "  {:<width$}  {:>10}  {}\n",
            c.distribution_center,
            c.po_count,
            bar(c.po_count as f64, max),
            width = width
        ));
    }
    out
}

pub fn render_diagnostic(d: &Diagnostic) -> String {
    let level = match d.severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    format!("[{}] {}", level, d.message)
}
