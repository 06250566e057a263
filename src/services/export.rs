use crate::domain::models::{RowRecord, Summary};
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ROW_HEADERS: [&str; 5] = [
    "Tanggal PO",
    "No PO",
    "Distribution Center",
    "Product Name",
    "Qty",
];
const ROWS_SHEET: &str = "Rows";
const SUMMARY_SHEET: &str = "Summary";

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("csv export {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("xlsx report {path}: {source}")]
    Xlsx { path: PathBuf, source: XlsxError },
}

#[derive(Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Tanggal PO")]
    po_date: String,
    #[serde(rename = "No PO")]
    po_number: String,
    #[serde(rename = "Distribution Center")]
    distribution_center: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Qty")]
    quantity: f64,
}

impl From<&RowRecord> for CsvRow {
    fn from(r: &RowRecord) -> Self {
        Self {
            po_date: r.po_date.clone(),
            po_number: r.po_number.clone(),
            distribution_center: r.distribution_center.clone(),
            product_name: r.product_name.clone(),
            quantity: r.quantity,
        }
    }
}

impl From<CsvRow> for RowRecord {
    fn from(r: CsvRow) -> Self {
        Self {
            po_date: r.po_date,
            po_number: r.po_number,
            distribution_center: r.distribution_center,
            product_name: r.product_name,
            quantity: r.quantity,
        }
    }
}

pub fn write_rows_csv(path: &Path, rows: &[RowRecord]) -> Result<(), ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    // Header is written by hand so an empty table still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(ROW_HEADERS).map_err(csv_err)?;
    for r in rows {
        writer.serialize(CsvRow::from(r)).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| csv_err(csv::Error::from(e)))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote csv export");
    Ok(())
}

pub fn read_rows_csv(path: &Path) -> Result<Vec<RowRecord>, ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    reader
        .deserialize::<CsvRow>()
        .map(|r| r.map(RowRecord::from).map_err(csv_err))
        .collect()
}

/// Writes the row table, both summary tables and their bar charts to one workbook.
pub fn write_report_xlsx(
    path: &Path,
    rows: &[RowRecord],
    summary: &Summary,
) -> Result<(), ExportError> {
    build_report(rows, summary)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|source| ExportError::Xlsx {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "wrote xlsx report");
    Ok(())
}

fn build_report(rows: &[RowRecord], summary: &Summary) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(ROWS_SHEET)?;
    for (col, header) in ROW_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (i, r) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &r.po_date)?;
        sheet.write_string(row, 1, &r.po_number)?;
        sheet.write_string(row, 2, &r.distribution_center)?;
        sheet.write_string(row, 3, &r.product_name)?;
        sheet.write_number(row, 4, r.quantity)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;
    sheet.write_string_with_format(0, 0, "Product Name", &bold)?;
    sheet.write_string_with_format(0, 1, "Total Qty", &bold)?;
    for (i, p) in summary.top_products.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &p.product_name)?;
        sheet.write_number(row, 1, p.total_quantity)?;
    }
    sheet.write_string_with_format(0, 3, "Distribution Center", &bold)?;
    sheet.write_string_with_format(0, 4, "PO Count", &bold)?;
    for (i, c) in summary.po_per_distribution_center.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 3, &c.distribution_center)?;
        sheet.write_number(row, 4, c.po_count as f64)?;
    }

    if !summary.top_products.is_empty() {
        let last = summary.top_products.len() as u32;
        let mut chart = Chart::new(ChartType::Bar);
        chart.title().set_name("Top Products by Qty");
        chart
            .add_series()
            .set_categories((SUMMARY_SHEET, 1, 0, last, 0))
            .set_values((SUMMARY_SHEET, 1, 1, last, 1));
        // largest total on top
        chart.x_axis().set_name("Product Name").set_reverse();
        chart.y_axis().set_name("Total Qty");
        chart.legend().set_hidden();
        sheet.insert_chart(1, 6, &chart)?;
    }

    if !summary.po_per_distribution_center.is_empty() {
        let last = summary.po_per_distribution_center.len() as u32;
        let mut chart = Chart::new(ChartType::Column);
        chart.title().set_name("PO Count per DC");
        chart
            .add_series()
            .set_categories((SUMMARY_SHEET, 1, 3, last, 3))
            .set_values((SUMMARY_SHEET, 1, 4, last, 4));
        chart.y_axis().set_name("PO Count");
        chart.legend().set_hidden();
        sheet.insert_chart(18, 6, &chart)?;
    }

    Ok(workbook)
}
