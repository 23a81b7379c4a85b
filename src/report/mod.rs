//! Tabular movie report: the document definition and its hand-off to the
//! viewer.

mod pdf;

pub use pdf::PdfReportRenderer;

use crate::catalog::Movie;
use crate::delivery::{PresentMode, Presenter, RenderError, RenderedFile};
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const REPORT_FILE_NAME: &str = "reporte_peliculas.pdf";
pub const REPORT_MIME_TYPE: &str = "application/pdf";
pub const DEFAULT_REPORT_TITLE: &str = "Informe de Películas";
pub const REPORT_HEADERS: [&str; 3] = ["Título", "Género", "Año de lanzamiento"];

pub type ReportRow = [String; 3];

/// Document definition of the report: a heading, a header row and one row
/// per movie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportTable {
    pub title: String,
    pub headers: ReportRow,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn from_movies(title: &str, movies: &[Arc<Movie>]) -> Self {
        ReportTable {
            title: title.to_string(),
            headers: REPORT_HEADERS.map(String::from),
            rows: movies
                .iter()
                .map(|movie| {
                    [
                        movie.title.clone(),
                        movie.genre.clone(),
                        movie.release_year.to_string(),
                    ]
                })
                .collect(),
        }
    }
}

/// Turns a [`ReportTable`] into document bytes.
pub trait ReportRenderer {
    fn render(&self, table: &ReportTable) -> Result<Vec<u8>, RenderError>;
}

/// Split `row_count` rows into pages. The first page holds fewer rows since
/// it also carries the heading. There is always at least one page, so an
/// empty report still shows its header row.
pub fn paginate(row_count: usize, first_page_rows: usize, page_rows: usize) -> Vec<Range<usize>> {
    let first_page_rows = first_page_rows.max(1);
    let page_rows = page_rows.max(1);

    let mut pages = vec![0..row_count.min(first_page_rows)];
    let mut start = pages[0].end;
    while start < row_count {
        let end = (start + page_rows).min(row_count);
        pages.push(start..end);
        start = end;
    }
    pages
}

/// Render the report for `movies` and open it through the presenter.
pub fn render_report(
    renderer: &dyn ReportRenderer,
    presenter: &dyn Presenter,
    title: &str,
    movies: &[Arc<Movie>],
) -> Result<PathBuf, RenderError> {
    let table = ReportTable::from_movies(title, movies);
    debug!("Rendering report with {} rows", table.rows.len());
    let bytes = renderer.render(&table)?;
    presenter.present(
        RenderedFile {
            file_name: REPORT_FILE_NAME.to_string(),
            mime_type: REPORT_MIME_TYPE.to_string(),
            bytes,
        },
        PresentMode::Open,
    )
}
