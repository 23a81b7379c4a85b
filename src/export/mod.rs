//! Spreadsheet export of the current dataset.

mod xlsx;

pub use xlsx::XlsxSpreadsheetWriter;

use crate::catalog::Movie;
use crate::delivery::{PresentMode, Presenter, RenderError, RenderedFile};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const EXPORT_FILE_NAME: &str = "reporte_peliculas.xlsx";
pub const EXPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_SHEET_NAME: &str = "data";

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Blank,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Blank,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(Cell::Number)
                .unwrap_or_else(|| Cell::Text(n.to_string())),
            Value::String(s) => Cell::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Cell::Text(value.to_string()),
        }
    }
}

/// A single sheet: header row made of the record field names, then one row
/// per record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Columns are the record keys exactly as read, collected in first-seen
    /// order across all records, so a passthrough field present only on later
    /// records still gets a column. Records lacking a column get a blank cell.
    pub fn from_movies(movies: &[Arc<Movie>]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for movie in movies {
            for key in movie.record().keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = movies
            .iter()
            .map(|movie| {
                headers
                    .iter()
                    .map(|key| movie.field(key).map(Cell::from).unwrap_or(Cell::Blank))
                    .collect()
            })
            .collect();

        SheetTable { headers, rows }
    }
}

/// Turns a [`SheetTable`] into workbook bytes.
pub trait SpreadsheetWriter {
    fn write(&self, sheet_name: &str, table: &SheetTable) -> Result<Vec<u8>, RenderError>;
}

/// The filtered result when there is one, the whole catalog otherwise.
pub fn choose_export_dataset<'a>(
    filtered: &'a [Arc<Movie>],
    catalog: &'a [Arc<Movie>],
) -> &'a [Arc<Movie>] {
    if filtered.is_empty() {
        catalog
    } else {
        filtered
    }
}

/// Serialize `movies` as a workbook and save it through the presenter.
pub fn export_movies(
    writer: &dyn SpreadsheetWriter,
    presenter: &dyn Presenter,
    movies: &[Arc<Movie>],
) -> Result<PathBuf, RenderError> {
    let table = SheetTable::from_movies(movies);
    debug!(
        "Exporting {} rows with columns {:?}",
        table.rows.len(),
        table.headers
    );
    let bytes = writer.write(EXPORT_SHEET_NAME, &table)?;
    presenter.present(
        RenderedFile {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            bytes,
        },
        PresentMode::Save,
    )
}
