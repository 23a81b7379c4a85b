//! Movie Report Library
//!
//! Loads a movie catalog, filters it by genre and release year, and renders
//! the selection as a PDF report or an XLSX spreadsheet.

pub mod catalog;
pub mod cli_style;
pub mod config;
pub mod delivery;
pub mod export;
pub mod facets;
pub mod filter;
pub mod report;
pub mod shell;
pub mod view;

// Re-export commonly used types for convenience
pub use catalog::{fetch_catalog, Catalog, CatalogSource, FetchError, Movie};
pub use facets::{extract_facets, Facets};
pub use filter::{filter_movies, FilterState};
pub use view::{ViewAction, ViewController, ViewState};
