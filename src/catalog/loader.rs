//! Catalog Loader
//!
//! Fetches the static product list once. The source is either a JSON file on
//! disk or a plain `http(s)://` resource; both hold a flat JSON array of
//! [`Product`] records.

use super::models::Product;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};
use thiserror::Error;
use url::Url;

/// Where the catalog is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CatalogSource {
    File(PathBuf),
    Remote(Url),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not fetch catalog from `{url}`: {source}")]
    Fetch { url: Url, source: reqwest::Error },
    #[error("catalog is not a valid product list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog source must not be empty")]
    EmptySource,
}

impl FromStr for CatalogSource {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CatalogError::EmptySource);
        }

        // Anything that is not an http(s) URL is treated as a path.
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(CatalogSource::Remote(url)),
            _ => Ok(CatalogSource::File(PathBuf::from(value))),
        }
    }
}

impl TryFrom<String> for CatalogSource {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CatalogSource> for String {
    fn from(source: CatalogSource) -> Self {
        source.to_string()
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches and parses the full product list from `source`.
pub async fn load_catalog(source: &CatalogSource) -> Result<Vec<Product>, CatalogError> {
    let body = match source {
        CatalogSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| CatalogError::Read {
                    path: path.clone(),
                    source,
                })?
        }
        CatalogSource::Remote(url) => fetch_remote(url).await?,
    };

    Ok(serde_json::from_slice(&body)?)
}

async fn fetch_remote(url: &Url) -> Result<Vec<u8>, CatalogError> {
    let fetch_error = |source: reqwest::Error| CatalogError::Fetch {
        url: url.clone(),
        source,
    };

    let response = reqwest::get(url.clone())
        .await
        .and_then(|r| r.error_for_status())
        .map_err(fetch_error)?;

    let bytes = response.bytes().await.map_err(fetch_error)?;
    Ok(bytes.to_vec())
}
