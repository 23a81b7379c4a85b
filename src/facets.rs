//! Distinct genre and year values used to populate the filter choices.

use crate::catalog::Catalog;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Facets {
    pub genres: Vec<String>,
    pub years: Vec<i32>,
}

/// Collect the distinct genres and release years of the catalog in a single
/// scan, keeping the order in which each value is first seen.
pub fn extract_facets(catalog: &Catalog) -> Facets {
    let mut seen_genres = HashSet::new();
    let mut seen_years = HashSet::new();
    let mut facets = Facets::default();

    for movie in catalog.movies() {
        if seen_genres.insert(movie.genre.as_str()) {
            facets.genres.push(movie.genre.clone());
        }
        if seen_years.insert(movie.release_year) {
            facets.years.push(movie.release_year);
        }
    }

    facets
}
