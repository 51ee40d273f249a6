#![deny(missing_docs)]
//! This crate downloads, caches and loads labeled text datasets for NLP
//! experiments.
//!
//! Datasets are described by a [`Registry`]. A [`DataFetcher`] downloads them into a local
//! cache directory, lists them, and removes them again. Classification corpora written in the
//! `__label__<tag> text` line format are read into a [`CategorizedCorpus`].
//!
//! ```no_run
//! use nlp_datasets::{Config, DataFetcher, NlpData};
//!
//! let fetcher = DataFetcher::new(Config::from_env()?)?;
//! fetcher.download("VNTC", None)?;
//! let corpus = fetcher.load_corpus(NlpData::Aivivn2019SaSample)?;
//! println!("{corpus}");
//! # Ok::<(), nlp_datasets::DatasetError>(())
//! ```
use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

pub mod config;
pub mod corpus;
pub mod extract;
pub mod fetch;
pub mod fetcher;
pub mod listing;
pub mod registry;

pub use config::Config;
pub use corpus::{
    load_classification_corpus, load_corpus, parse_line, read_text_classification_file,
    CategorizedCorpus, CorpusStats, Label, NlpData, Sentence,
};
pub use fetch::{Fetch, HttpFetcher};
pub use fetcher::{DataFetcher, Download};
pub use registry::{Archive, Entry, License, Registry, Source};

/// The default trait to implement to get the simplest API
pub trait Dataset {
    /// The type of objects contained in the dataset
    type Item;

    /// The length of the dataset
    fn len(&self) -> usize;

    /// Get item at specific index. Should return `None` if and only if
    /// `index >= dataset.len()`.
    fn get(&self, index: usize) -> Option<Self::Item>;
}

/// Generic structure to iterate over [`Dataset`].
pub struct DatasetIterator<'a, D> {
    dataset: &'a D,
    index: usize,
}

/// Iterate of the dataset in order
pub fn iter<D: Dataset>(dataset: &D) -> DatasetIterator<'_, D> {
    DatasetIterator { dataset, index: 0 }
}

impl<'a, D: Dataset> Iterator for DatasetIterator<'a, D> {
    type Item = D::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let object = self.dataset.get(self.index);
        self.index += 1;
        object
    }
}

/// Guidance shown to users about datasets whose license forbids a public download URL.
pub const MISSING_URL_NOTICE: &str =
    "Caution:\n  With closed license dataset, you must provide URL to download";

/// Error type for datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset name is not part of the registry.
    #[error("No matching distribution found for '{0}'")]
    UnknownDataset(String),

    /// A closed license dataset was requested without a download URL.
    #[error("{} (dataset '{0}')", MISSING_URL_NOTICE)]
    MissingUrl(String),

    /// The corpus identifier does not name a known corpus.
    #[error("Unknown corpus identifier '{0}'")]
    UnknownCorpus(String),

    /// No cache directory could be derived from the environment.
    #[error("Cannot determine a cache directory, set NLP_DATASETS_CACHE")]
    NoCacheDir,

    /// Error in the request
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The downloaded archive could not be extracted.
    #[error("zip error: {0}")]
    ZipError(#[from] ZipError),

    /// The downloaded data did not contain the dataset's expected file.
    #[error("Download of '{name}' did not produce {path:?}")]
    MissingTarget {
        /// The dataset name.
        name: String,
        /// The expected cache path.
        path: PathBuf,
    },

    /// A corpus split file could not be read.
    #[error("Cannot read {path:?}: {source}")]
    ReadSplit {
        /// The split file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// IO error on the cache directory
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DatasetError {
    /// Whether the error is a user-facing notice rather than a failure.
    ///
    /// Unknown dataset names, unknown corpus identifiers and missing URLs abort the operation
    /// but are reported to the user as plain messages.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            DatasetError::UnknownDataset(_)
                | DatasetError::MissingUrl(_)
                | DatasetError::UnknownCorpus(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Squares(usize);

    impl Dataset for Squares {
        type Item = usize;

        fn len(&self) -> usize {
            self.0
        }

        fn get(&self, index: usize) -> Option<usize> {
            (index < self.len()).then(|| index * index)
        }
    }

    #[test]
    fn iterate_in_order() {
        let squares: Vec<_> = iter(&Squares(4)).collect();
        assert_eq!(squares, vec![0, 1, 4, 9]);
        assert_eq!(iter(&Squares(0)).count(), 0);
    }

    #[test]
    fn notices_are_not_failures() {
        assert!(DatasetError::UnknownDataset("X".to_string()).is_notice());
        assert!(DatasetError::MissingUrl("X".to_string()).is_notice());
        assert!(DatasetError::UnknownCorpus("x".to_string()).is_notice());
        assert!(!DatasetError::NoCacheDir.is_notice());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(!DatasetError::IoError(io).is_notice());
    }

    #[test]
    fn unknown_dataset_message() {
        let err = DatasetError::UnknownDataset("FOO".to_string());
        assert_eq!(err.to_string(), "No matching distribution found for 'FOO'");
    }
}
