//! Downloading, listing and removing datasets.
use crate::corpus::{self, CategorizedCorpus, NlpData};
use crate::extract::unpack_zip;
use crate::fetch::{Fetch, HttpFetcher};
use crate::listing;
use crate::registry::{Archive, Entry, Registry, Source};
use crate::{Config, DatasetError};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of [`DataFetcher::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    /// The dataset was downloaded to this path.
    Fetched(PathBuf),
    /// The dataset was already present at this path, nothing was done.
    AlreadyCached(PathBuf),
}

impl Download {
    /// The dataset's cache path.
    pub fn path(&self) -> &Path {
        match self {
            Download::Fetched(path) | Download::AlreadyCached(path) => path,
        }
    }
}

/// The core struct used to manage the local dataset cache.
pub struct DataFetcher<F = HttpFetcher> {
    registry: Registry,
    config: Config,
    fetch: F,
}

impl DataFetcher<HttpFetcher> {
    /// Fetcher over the builtin registry, downloading over HTTP.
    pub fn new(config: Config) -> Result<Self, DatasetError> {
        Ok(Self::with_fetch(
            Registry::builtin(),
            config,
            HttpFetcher::new()?,
        ))
    }
}

impl<F: Fetch> DataFetcher<F> {
    /// Create the fetcher if you already have a registry and a [`Fetch`] implementation at hand.
    pub fn with_fetch(registry: Registry, config: Config, fetch: F) -> Self {
        Self {
            registry,
            config,
            fetch,
        }
    }

    /// The registry this fetcher works with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The directories this fetcher works with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn entry(&self, name: &str) -> Result<&Entry, DatasetError> {
        self.registry
            .get(name)
            .ok_or_else(|| DatasetError::UnknownDataset(name.to_string()))
    }

    /// Where the dataset `name` lives once downloaded.
    pub fn cache_path(&self, name: &str) -> Result<PathBuf, DatasetError> {
        Ok(self.entry(name)?.cache_path(&self.config.cache_root))
    }

    /// Download the dataset `name` into the cache.
    ///
    /// `url` overrides the registry's download location and is required for closed license
    /// datasets. Nothing is transferred when the dataset is already cached.
    pub fn download(&self, name: &str, url: Option<&str>) -> Result<Download, DatasetError> {
        let entry = self.entry(name)?;
        let target = entry.cache_path(&self.config.cache_root);
        if target.exists() {
            info!("Data is already existed: '{name}' in {target:?}");
            return Ok(Download::AlreadyCached(target));
        }

        let url = match (url, entry.source) {
            (Some(url), _) => url,
            (None, Source::Public(url)) => url,
            (None, Source::CallerSupplied) => {
                return Err(DatasetError::MissingUrl(name.to_string()))
            }
        };

        let cache_dir = entry.cache_dir(&self.config.cache_root);
        fs::create_dir_all(&cache_dir)?;
        // The transfer lands in its own empty directory, so the downloaded file never shares a
        // name with dataset files. Dropping it removes the archive, also on error.
        let downloads = tempfile::Builder::new()
            .prefix(".download-")
            .tempdir_in(&cache_dir)?;
        let fetched = self.fetch.fetch(url, downloads.path())?;
        debug!("Fetched {url} to {fetched:?}");

        match entry.archive {
            Archive::PlainFile => fs::rename(&fetched, &target)?,
            Archive::Zip => unpack_zip(&fetched, &cache_dir)?,
        }
        downloads.close()?;

        if !target.exists() {
            return Err(DatasetError::MissingTarget {
                name: name.to_string(),
                path: target,
            });
        }
        info!("Downloaded '{name}' to {target:?}");
        Ok(Download::Fetched(target))
    }

    /// The registry rendered as a table, see [`listing::render`].
    pub fn list(&self, include_restricted: bool) -> String {
        listing::render(&self.registry, include_restricted)
    }

    /// Delete the cache directory of dataset `name`.
    ///
    /// Returns whether a directory was deleted. A dataset that is not cached is not an error.
    pub fn remove(&self, name: &str) -> Result<bool, DatasetError> {
        let cache_dir = self.entry(name)?.cache_dir(&self.config.cache_root);
        let existed = cache_dir.is_dir();
        if existed {
            fs::remove_dir_all(&cache_dir)?;
        } else {
            debug!("{cache_dir:?} does not exist");
        }
        info!("Dataset {name} is removed.");
        Ok(existed)
    }

    /// Load the corpus named by `id`, see [`corpus::load_corpus`].
    pub fn load_corpus(&self, id: NlpData) -> Result<CategorizedCorpus, DatasetError> {
        corpus::load_corpus(&self.config, id)
    }
}
