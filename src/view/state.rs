use crate::catalog::{Catalog, FetchError, Movie};
use crate::facets::{extract_facets, Facets};
use crate::filter::FilterState;
use std::sync::Arc;
use tracing::{error, info};

/// Everything the view owns once the catalog is available.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadyView {
    pub catalog: Catalog,
    pub facets: Facets,
    pub filter: FilterState,
    pub filtered: Vec<Arc<Movie>>,
}

impl ReadyView {
    pub fn new(catalog: Catalog) -> Self {
        let facets = extract_facets(&catalog);
        ReadyView {
            catalog,
            facets,
            filter: FilterState::default(),
            filtered: Vec::new(),
        }
    }
}

/// Lifecycle of the view. The value is owned by whoever drives the view and
/// moved through every action handler.
#[derive(Debug)]
pub enum ViewState {
    Loading,
    Ready(ReadyView),
    /// The catalog could not be fetched. Only restarting the view recovers.
    Error(FetchError),
}

impl ViewState {
    /// Leave `Loading` once the fetch has completed.
    pub fn loaded(result: Result<Catalog, FetchError>) -> Self {
        match result {
            Ok(catalog) => {
                let ready = ReadyView::new(catalog);
                info!(
                    "View ready: {} movies, {} genres, {} years",
                    ready.catalog.len(),
                    ready.facets.genres.len(),
                    ready.facets.years.len()
                );
                ViewState::Ready(ready)
            }
            Err(err) => {
                error!("Failed to load catalog: {}", err);
                ViewState::Error(err)
            }
        }
    }

    pub fn ready(&self) -> Option<&ReadyView> {
        match self {
            ViewState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Error(_) => "error",
        }
    }
}
