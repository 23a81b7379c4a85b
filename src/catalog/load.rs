use super::{Catalog, Movie};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while fetching the catalog document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Catalog document is not a valid list of movies: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the catalog document lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

impl CatalogSource {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            CatalogSource::Url(s.to_string())
        } else {
            CatalogSource::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Url(url) => write!(f, "{}", url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
    /// Request timeout for URL sources, `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Fetch the catalog document and deserialize it into a [`Catalog`].
///
/// This is the only suspending operation of the program. There is no retry:
/// the first failure is returned to the caller.
pub async fn fetch_catalog(
    source: &CatalogSource,
    options: &FetchOptions,
) -> Result<Catalog, FetchError> {
    info!("Fetching catalog from {}...", source);
    let bytes = match source {
        CatalogSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        CatalogSource::Url(url) => fetch_url(url, options).await?,
    };
    debug!("Catalog document is {} bytes", bytes.len());

    let catalog = parse_catalog(&bytes)?;
    info!("Catalog has {} movies", catalog.len());
    Ok(catalog)
}

async fn fetch_url(url: &str, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    Ok(response.bytes().await?.to_vec())
}

pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog, FetchError> {
    let movies: Vec<Movie> = serde_json::from_slice(bytes)?;
    Ok(Catalog::new(movies))
}
