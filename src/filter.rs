//! Genre/year filtering of the catalog.

use crate::catalog::Movie;
use std::sync::Arc;

/// The constraints currently selected by the user. `None` matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl FilterState {
    /// An empty genre string counts as no genre constraint.
    pub fn new(genre: Option<String>, year: Option<i32>) -> Self {
        FilterState {
            genre: genre.filter(|g| !g.is_empty()),
            year,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.year.is_none()
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        let genre_matches = match &self.genre {
            None => true,
            Some(genre) => movie
                .genre
                .to_lowercase()
                .contains(&genre.to_lowercase()),
        };
        let year_matches = self.year.map_or(true, |year| movie.release_year == year);
        genre_matches && year_matches
    }
}

/// Keep the movies matching both constraints, in their original order.
pub fn filter_movies(movies: &[Arc<Movie>], filter: &FilterState) -> Vec<Arc<Movie>> {
    if filter.is_empty() {
        return movies.to_vec();
    }
    movies
        .iter()
        .filter(|movie| filter.matches(movie))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn titles(movies: &[Arc<Movie>]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    fn genre(g: &str) -> FilterState {
        FilterState::new(Some(g.to_string()), None)
    }

    fn year(y: i32) -> FilterState {
        FilterState::new(None, Some(y))
    }

    #[test]
    fn genre_substring_matches() {
        let catalog = Catalog::sample();
        let result = filter_movies(catalog.movies(), &genre("rom"));
        assert_eq!(titles(&result), vec!["Amelie"]);
    }

    #[test]
    fn genre_match_ignores_case() {
        let catalog = Catalog::sample();
        let upper = filter_movies(catalog.movies(), &genre("ACTION"));
        let lower = filter_movies(catalog.movies(), &genre("action"));
        assert_eq!(upper, lower);
        assert_eq!(titles(&upper), vec!["Matrix"]);
    }

    #[test]
    fn year_match_is_exact() {
        let catalog = Catalog::sample();
        assert!(filter_movies(catalog.movies(), &year(2000)).is_empty());
        assert_eq!(titles(&filter_movies(catalog.movies(), &year(1999))), vec!["Matrix"]);
    }

    #[test]
    fn both_constraints_must_hold() {
        let catalog = Catalog::sample();
        let both = FilterState::new(Some("a".to_string()), Some(2009));
        assert_eq!(titles(&filter_movies(catalog.movies(), &both)), vec!["Up"]);

        let disjoint = FilterState::new(Some("romance".to_string()), Some(1999));
        assert!(filter_movies(catalog.movies(), &disjoint).is_empty());
    }

    #[test]
    fn no_constraints_is_identity() {
        let catalog = Catalog::sample();
        let result = filter_movies(catalog.movies(), &FilterState::default());
        assert_eq!(result.as_slice(), catalog.movies());
    }

    #[test]
    fn empty_genre_is_no_constraint() {
        let state = FilterState::new(Some(String::new()), None);
        assert!(state.is_empty());
    }

    #[test]
    fn result_preserves_catalog_order() {
        let catalog = Catalog::new(vec![
            Movie::new("Z", "Drama", 2001),
            Movie::new("A", "Comedy", 2001),
            Movie::new("M", "Dramedy", 2001),
        ]);
        let result = filter_movies(catalog.movies(), &genre("dram"));
        assert_eq!(titles(&result), vec!["Z", "M"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = Catalog::sample();
        let state = FilterState::new(Some("a".to_string()), None);
        let once = filter_movies(catalog.movies(), &state);
        let twice = filter_movies(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_catalog_gives_empty_result() {
        assert!(filter_movies(&[], &genre("action")).is_empty());
    }
}
