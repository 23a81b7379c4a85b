use super::{ReadyView, ViewState};
use crate::delivery::{FileDelivery, Presenter, RenderError};
use crate::export::{choose_export_dataset, export_movies, SpreadsheetWriter, XlsxSpreadsheetWriter};
use crate::filter::{filter_movies, FilterState};
use crate::report::{render_report, PdfReportRenderer, ReportRenderer};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// User-initiated actions, processed one at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    ApplyFilters(FilterState),
    ClearFilters,
    Export,
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("The catalog is still loading")]
    NotReady,

    #[error("The catalog is unavailable ({0}), restart to try again")]
    Unavailable(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What an action produced, besides the new state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionEffect {
    ReportOpened { path: PathBuf, rows: usize },
    Exported { path: PathBuf, rows: usize },
}

/// Result of handling an action. The state is always handed back, even when
/// the outcome is an error.
#[derive(Debug)]
pub struct Transition {
    pub state: ViewState,
    pub outcome: Result<ActionEffect, ViewError>,
}

pub struct ViewController {
    report_renderer: Box<dyn ReportRenderer>,
    spreadsheet_writer: Box<dyn SpreadsheetWriter>,
    presenter: Box<dyn Presenter>,
    report_title: String,
}

impl ViewController {
    pub fn new(
        report_renderer: Box<dyn ReportRenderer>,
        spreadsheet_writer: Box<dyn SpreadsheetWriter>,
        presenter: Box<dyn Presenter>,
        report_title: String,
    ) -> Self {
        ViewController {
            report_renderer,
            spreadsheet_writer,
            presenter,
            report_title,
        }
    }

    /// PDF reports and XLSX exports written to `output_dir`.
    pub fn with_file_delivery<P: Into<PathBuf>>(
        output_dir: P,
        open_reports: bool,
        report_title: String,
    ) -> Self {
        ViewController::new(
            Box::new(PdfReportRenderer::new()),
            Box::new(XlsxSpreadsheetWriter::new()),
            Box::new(FileDelivery::new(output_dir, open_reports)),
            report_title,
        )
    }

    pub fn handle(&self, state: ViewState, action: ViewAction) -> Transition {
        let mut ready = match state {
            ViewState::Ready(ready) => ready,
            ViewState::Loading => {
                warn!("Ignoring {:?} while loading", action);
                return Transition {
                    state: ViewState::Loading,
                    outcome: Err(ViewError::NotReady),
                };
            }
            ViewState::Error(err) => {
                let reason = err.to_string();
                return Transition {
                    state: ViewState::Error(err),
                    outcome: Err(ViewError::Unavailable(reason)),
                };
            }
        };

        let outcome = match action {
            ViewAction::ApplyFilters(filter) => self.apply_filters(&mut ready, filter),
            ViewAction::ClearFilters => self.clear_filters(&mut ready),
            ViewAction::Export => self.export(&ready),
        };

        Transition {
            state: ViewState::Ready(ready),
            outcome,
        }
    }

    fn apply_filters(
        &self,
        ready: &mut ReadyView,
        filter: FilterState,
    ) -> Result<ActionEffect, ViewError> {
        ready.filtered = filter_movies(ready.catalog.movies(), &filter);
        ready.filter = filter;
        info!(
            "Filter {:?} matched {} of {} movies",
            ready.filter,
            ready.filtered.len(),
            ready.catalog.len()
        );
        self.open_report(ready)
    }

    fn clear_filters(&self, ready: &mut ReadyView) -> Result<ActionEffect, ViewError> {
        ready.filter = FilterState::default();
        ready.filtered.clear();
        info!("Filters cleared");
        self.open_report(ready)
    }

    /// The report always follows a filter change, even an empty one.
    fn open_report(&self, ready: &ReadyView) -> Result<ActionEffect, ViewError> {
        let path = render_report(
            self.report_renderer.as_ref(),
            self.presenter.as_ref(),
            &self.report_title,
            &ready.filtered,
        )?;
        Ok(ActionEffect::ReportOpened {
            path,
            rows: ready.filtered.len(),
        })
    }

    fn export(&self, ready: &ReadyView) -> Result<ActionEffect, ViewError> {
        let movies = choose_export_dataset(&ready.filtered, ready.catalog.movies());
        let path = export_movies(
            self.spreadsheet_writer.as_ref(),
            self.presenter.as_ref(),
            movies,
        )?;
        info!("Exported {} movies to {:?}", movies.len(), path);
        Ok(ActionEffect::Exported {
            path,
            rows: movies.len(),
        })
    }
}
