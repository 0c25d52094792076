use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, RetrievalError};

// ---------------------------------------------------------------------------
// Dataset selector → locator
// ---------------------------------------------------------------------------

/// Which table to ingest: one of the two bundled datasets or any locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSelector {
    Mouse,
    Fish,
    Locator(String),
}

impl DatasetSelector {
    /// Resource location this selector points at.
    pub fn locator(&self) -> Locator {
        match self {
            DatasetSelector::Mouse => Locator::Path(PathBuf::from("./mouseDeSeq2.txt")),
            DatasetSelector::Fish => Locator::Path(PathBuf::from("./fishDeSeq2.txt")),
            DatasetSelector::Locator(raw) => Locator::parse(raw),
        }
    }
}

impl FromStr for DatasetSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "mouse" => DatasetSelector::Mouse,
            "fish" => DatasetSelector::Fish,
            other => DatasetSelector::Locator(other.to_string()),
        })
    }
}

/// Where the table text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Url(String),
    Path(PathBuf),
}

impl Locator {
    /// `http(s)://` locators are fetched over the network, `file://` is
    /// stripped, and anything else is a local path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Locator::Url(raw.to_string())
        } else if let Some(path) = raw.strip_prefix("file://") {
            Locator::Path(PathBuf::from(path))
        } else {
            Locator::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Url(url) => write!(f, "{url}"),
            Locator::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// Fetch the whole resource and decode it as text.
///
/// Nothing is handed on until the full body is available. A non-success
/// HTTP status counts as a failed retrieval. Local files must be valid
/// UTF-8 or fail with [`RetrievalError::Decode`]; HTTP bodies are decoded by
/// `reqwest` using the response charset, which replaces invalid sequences
/// instead of failing.
pub async fn fetch_text(locator: &Locator) -> Result<String> {
    match locator {
        Locator::Url(url) => fetch_url(url).await,
        Locator::Path(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| RetrievalError::Io {
                    path: path.clone(),
                    source,
                })?;
            String::from_utf8(bytes).map_err(|source| RetrievalError::Decode {
                locator: locator.to_string(),
                source,
            })
        }
    }
}

async fn fetch_url(url: &str) -> Result<String> {
    let http = |source: reqwest::Error| RetrievalError::Http {
        url: url.to_string(),
        source,
    };
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(http)?;
    response.text().await.map_err(http)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_selectors() {
        let mouse: DatasetSelector = "mouse".parse().unwrap();
        assert_eq!(mouse, DatasetSelector::Mouse);
        assert_eq!(
            mouse.locator(),
            Locator::Path(PathBuf::from("./mouseDeSeq2.txt"))
        );
        assert_eq!(
            "fish".parse::<DatasetSelector>().unwrap().locator(),
            Locator::Path(PathBuf::from("./fishDeSeq2.txt"))
        );
    }

    #[test]
    fn direct_locators() {
        let url = "https://example.org/table.txt";
        assert_eq!(
            url.parse::<DatasetSelector>().unwrap().locator(),
            Locator::Url(url.to_string())
        );
        assert_eq!(
            Locator::parse("file:///tmp/t.txt"),
            Locator::Path(PathBuf::from("/tmp/t.txt"))
        );
        assert_eq!(
            Locator::parse("data/Mouse.txt"),
            Locator::Path(PathBuf::from("data/Mouse.txt"))
        );
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let locator = Locator::Path(PathBuf::from("definitely/not/here.txt"));
        let err = fetch_text(&locator).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Io { .. }));
    }

    #[tokio::test]
    async fn invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0x66, 0xff, 0xfe, 0x0a]).unwrap();

        let err = fetch_text(&Locator::Path(path)).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Decode { .. }));
    }
}
