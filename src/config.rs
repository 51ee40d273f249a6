//! Cache and sample directory configuration.
use crate::DatasetError;
use std::path::{Path, PathBuf};

/// Environment variable overriding the cache root.
pub const CACHE_ENV: &str = "NLP_DATASETS_CACHE";

/// Environment variable overriding the bundled sample root.
pub const SAMPLES_ENV: &str = "NLP_DATASETS_SAMPLES";

/// Directories used by the fetcher and the corpus loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base directory of downloaded datasets.
    pub cache_root: PathBuf,
    /// Base directory of the sample corpora shipped with the package.
    pub sample_root: PathBuf,
}

impl Config {
    /// A configuration caching under `cache_root` with the bundled samples.
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            sample_root: Self::bundled_samples(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// The cache root is `$NLP_DATASETS_CACHE`, or `nlp-datasets` in the user cache directory
    /// (`~/.cache` on Linux). The sample root is `$NLP_DATASETS_SAMPLES`, or the package's `data`
    /// directory.
    pub fn from_env() -> Result<Self, DatasetError> {
        let cache_root = match std::env::var_os(CACHE_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::cache_dir()
                .ok_or(DatasetError::NoCacheDir)?
                .join("nlp-datasets"),
        };
        let sample_root = std::env::var_os(SAMPLES_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::bundled_samples);
        Ok(Self {
            cache_root,
            sample_root,
        })
    }

    /// Replace the sample root.
    pub fn with_sample_root(mut self, sample_root: impl Into<PathBuf>) -> Self {
        self.sample_root = sample_root.into();
        self
    }

    /// Replace the cache root.
    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    fn bundled_samples() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_samples_ship_with_the_package() {
        let config = Config::new("/tmp/cache");
        assert_eq!(config.cache_root, PathBuf::from("/tmp/cache"));
        assert!(config.sample_root.join("aivivn2019_sa_sample").is_dir());
    }

    #[test]
    fn overrides() {
        let config = Config::new("/a")
            .with_cache_root("/b")
            .with_sample_root("/c");
        assert_eq!(config.cache_root, PathBuf::from("/b"));
        assert_eq!(config.sample_root, PathBuf::from("/c"));
    }
}
