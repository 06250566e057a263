use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// One flattened order line. Built once from a (document, line item) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRecord {
    pub po_date: String,
    pub po_number: String,
    pub distribution_center: String,
    pub product_name: String,
    pub quantity: f64,
}

/// Contents of the document id column. Blank cells are listed by 1-based sheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentColumn {
    pub ids: Vec<String>,
    pub blank_rows: Vec<usize>,
}

/// Every row collected during one run, in fetch order.
pub type RowTable = Vec<RowRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    EmptyData,
    Decode,
    Http,
    MalformedItem,
}

/// Per-document problem report. A document gets at most one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub document_id: String,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub fraction: f64,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub rows: RowTable,
    pub diagnostics: Vec<Diagnostic>,
    pub processed: usize,
    pub total: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotal {
    pub product_name: String,
    pub total_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CenterCount {
    pub distribution_center: String,
    pub po_count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub top_products: Vec<ProductTotal>,
    pub po_per_distribution_center: Vec<CenterCount>,
}

#[derive(Serialize)]
pub struct FetchReport {
    pub total_documents: usize,
    pub skipped_rows: Vec<usize>,
    pub processed: usize,
    pub cancelled: bool,
    pub empty_result: bool,
    pub rows: RowTable,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: Summary,
    pub exported_csv: Option<String>,
    pub exported_report: Option<String>,
}

#[derive(Serialize)]
pub struct SummarizeReport {
    pub source: String,
    pub row_count: usize,
    pub summary: Summary,
    pub exported_report: Option<String>,
}

#[derive(Serialize)]
pub struct DocumentList {
    pub source: String,
    pub count: usize,
    pub document_ids: Vec<String>,
    pub skipped_rows: Vec<usize>,
}
