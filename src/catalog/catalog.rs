use super::Movie;
use std::sync::Arc;

/// The full, ordered list of movies loaded for a session.
///
/// Entries are shared behind `Arc` so filtered views can reference them
/// without copying, and there is no API to add, remove or change entries
/// once the catalog has been built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<Arc<Movie>>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Catalog {
            movies: movies.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn movies(&self) -> &[Arc<Movie>] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    #[cfg(test)]
    pub fn sample() -> Self {
        Catalog::new(vec![
            Movie::new("Matrix", "Action", 1999),
            Movie::new("Up", "Animation", 2009),
            Movie::new("Amelie", "Romance", 2001),
        ])
    }
}

impl From<Vec<Movie>> for Catalog {
    fn from(movies: Vec<Movie>) -> Self {
        Catalog::new(movies)
    }
}
