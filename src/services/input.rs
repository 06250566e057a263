use crate::domain::models::DocumentColumn;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};

pub const DOCUMENT_COLUMN: &str = "No. Dokumen";

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        source: calamine::Error,
    },
    #[error("workbook {0} has no worksheets")]
    NoWorksheet(PathBuf),
    #[error("column '{column}' not found in the header row of {path}")]
    MissingColumn { column: &'static str, path: PathBuf },
}

/// Reads document ids from the `No. Dokumen` column of the first worksheet.
///
/// The first row of the sheet is the header. Ids keep sheet order and duplicates;
/// blank cells are reported by sheet row instead.
pub fn read_document_column(path: &Path) -> Result<DocumentColumn, InputError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(r)) => r,
        Some(Err(source)) => {
            return Err(InputError::Open {
                path: path.to_path_buf(),
                source,
            })
        }
        None => return Err(InputError::NoWorksheet(path.to_path_buf())),
    };

    let column = document_ids_from_rows(range.rows()).ok_or_else(|| InputError::MissingColumn {
        column: DOCUMENT_COLUMN,
        path: path.to_path_buf(),
    })?;
    tracing::info!(
        path = %path.display(),
        count = column.ids.len(),
        blank = column.blank_rows.len(),
        "read document ids"
    );
    Ok(column)
}

fn document_ids_from_rows<'a>(
    mut rows: impl Iterator<Item = &'a [Data]>,
) -> Option<DocumentColumn> {
    let header = rows.next()?;
    let col = header
        .iter()
        .position(|c| matches!(c, Data::String(s) if s == DOCUMENT_COLUMN))?;

    let mut column = DocumentColumn::default();
    for (offset, row) in rows.enumerate() {
        match row.get(col).and_then(cell_text) {
            Some(id) => column.ids.push(id),
            None => {
                // +2: one for the header, one for 1-based sheet rows
                let sheet_row = offset + 2;
                tracing::warn!(row = sheet_row, "blank document id skipped");
                column.blank_rows.push(sheet_row);
            }
        }
    }
    Some(column)
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
