//! The fetch-and-cache primitive.
//!
//! A [`Fetch`] implementation turns a URL into a local file inside a cache directory. The
//! [`DataFetcher`](crate::DataFetcher) decides what to do with that file afterwards.
use crate::DatasetError;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Downloads a URL into a cache directory.
pub trait Fetch {
    /// Download `url` into `cache_dir` and return the local path of the file.
    ///
    /// Implementations may return a previously downloaded file instead of transferring it again.
    fn fetch(&self, url: &str, cache_dir: &Path) -> Result<PathBuf, DatasetError>;
}

/// Name used for the local copy of `url`: its last path segment, without query string.
///
/// `https://host/s/abc/VNTC.zip?dl=1` is stored as `VNTC.zip`. URLs that cannot be parsed or
/// have no usable segment are stored as `download`.
pub fn local_filename(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|segment| !segment.is_empty() && segment != "." && segment != "..")
        .unwrap_or_else(|| "download".to_string())
}

/// Blocking HTTP implementation of [`Fetch`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Result<Self, DatasetError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Create the fetcher if you already have a [`reqwest::blocking::Client`] at hand.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, cache_dir: &Path) -> Result<PathBuf, DatasetError> {
        let path = cache_dir.join(local_filename(url));
        if path.exists() {
            debug!("Reusing cached download {path:?}");
            return Ok(path);
        }
        fs::create_dir_all(cache_dir)?;

        info!("Downloading {url}");
        let mut response = self.client.get(url).send()?.error_for_status()?;
        // Write next to the destination so the final rename stays on one filesystem.
        let mut file = NamedTempFile::new_in(cache_dir)?;
        let size = response.copy_to(file.as_file_mut())?;
        file.persist(&path).map_err(|err| err.error)?;
        debug!("Stored {size} bytes in {path:?}");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_filename_drops_query() {
        assert_eq!(
            local_filename("https://www.dropbox.com/s/4iw3xtnkd74h3pj/VNTC.zip?dl=1"),
            "VNTC.zip"
        );
        assert_eq!(
            local_filename("https://example.com/data/corpus.txt"),
            "corpus.txt"
        );
    }

    #[test]
    fn local_filename_fallback() {
        assert_eq!(local_filename("https://example.com/"), "download");
        assert_eq!(local_filename("https://example.com"), "download");
        assert_eq!(local_filename("not a url"), "download");
    }

    #[test]
    fn cached_file_is_reused_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("corpus.txt");
        fs::write(&cached, "hello").unwrap();

        // The host does not resolve, so a request would fail.
        let fetcher = HttpFetcher::new().unwrap();
        let path = fetcher
            .fetch("http://invalid.invalid/corpus.txt", dir.path())
            .unwrap();
        assert_eq!(path, cached);
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}
