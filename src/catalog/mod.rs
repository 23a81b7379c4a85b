mod catalog;
mod load;
mod movie;

pub use catalog::Catalog;
pub use load::{fetch_catalog, parse_catalog, CatalogSource, FetchError, FetchOptions};
pub use movie::Movie;
