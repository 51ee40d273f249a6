//! The table of known datasets.
//!
//! Every dataset is described by an [`Entry`]: where it lives in the cache, where it is
//! downloaded from, and what to do with the downloaded file. Adding a dataset is a matter of
//! adding an entry, the fetcher has no per-dataset code.
use std::fmt;
use std::path::{Path, PathBuf};

/// Licensing terms of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum License {
    /// Freely redistributable, a public download URL is known.
    Open,
    /// Restricted, users must obtain a download URL themselves.
    Closed,
}

impl License {
    /// Whether the license prevents publishing a download URL.
    pub fn is_restricted(&self) -> bool {
        matches!(self, License::Closed)
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            License::Open => write!(f, "Open"),
            License::Closed => write!(f, "Close"),
        }
    }
}

/// Where the bytes of a dataset come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A public URL.
    Public(&'static str),
    /// The caller has to supply the URL.
    CallerSupplied,
}

/// What the downloaded file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archive {
    /// A single file, moved to the entry's file name.
    PlainFile,
    /// A zip archive, extracted into the entry's cache directory then deleted.
    Zip,
}

/// Metadata for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Registry key, e.g. `VNTC`.
    pub name: &'static str,
    /// Kind of data, e.g. `Categorized`.
    pub category: &'static str,
    /// Licensing terms.
    pub license: License,
    /// Publication year.
    pub year: u16,
    /// Cache subdirectory, relative to the cache root.
    pub cache_dir: &'static str,
    /// File (or directory) whose presence marks the dataset as downloaded.
    pub filename: &'static str,
    /// Download location.
    pub source: Source,
    /// Kind of the downloaded file.
    pub archive: Archive,
}

impl Entry {
    /// The directory holding this dataset under `cache_root`.
    pub fn cache_dir(&self, cache_root: &Path) -> PathBuf {
        cache_root.join(self.cache_dir)
    }

    /// The path whose existence means the dataset is cached.
    pub fn cache_path(&self, cache_root: &Path) -> PathBuf {
        self.cache_dir(cache_root).join(self.filename)
    }
}

const BUILTIN: &[Entry] = &[
    Entry {
        name: "VNESES",
        category: "Monolingual",
        license: License::Open,
        year: 2012,
        cache_dir: "datasets/VNESES",
        filename: "VNESES.txt",
        source: Source::Public("https://www.dropbox.com/s/m4agkrbjuvnq4el/VNESEcorpus.txt?dl=1"),
        archive: Archive::PlainFile,
    },
    Entry {
        name: "VNTQ_SMALL",
        category: "Monolingual",
        license: License::Open,
        year: 2012,
        cache_dir: "datasets/VNTQ_SMALL",
        filename: "VNTQ_SMALL.txt",
        source: Source::Public(
            "https://www.dropbox.com/s/b0z17fa8hm6u1rr/VNTQcorpus-small.txt?dl=1",
        ),
        archive: Archive::PlainFile,
    },
    Entry {
        name: "VNTQ_BIG",
        category: "Monolingual",
        license: License::Open,
        year: 2012,
        cache_dir: "datasets/VNTQ_BIG",
        filename: "VNTQ_BIG.txt",
        source: Source::Public("https://www.dropbox.com/s/t4z90vs3qhpq9wg/VNTQcorpus-big.txt?dl=1"),
        archive: Archive::PlainFile,
    },
    Entry {
        name: "VNTC",
        category: "Categorized",
        license: License::Open,
        year: 2007,
        cache_dir: "datasets/VNTC",
        filename: "VNTC",
        source: Source::Public("https://www.dropbox.com/s/4iw3xtnkd74h3pj/VNTC.zip?dl=1"),
        archive: Archive::Zip,
    },
    Entry {
        name: "VLSP2013-WTK",
        category: "Tokenization",
        license: License::Closed,
        year: 2013,
        cache_dir: "datasets/VLSP2013-WTK",
        filename: "train.txt",
        source: Source::CallerSupplied,
        archive: Archive::Zip,
    },
    Entry {
        name: "VLSP2013-POS",
        category: "Tagging",
        license: License::Closed,
        year: 2013,
        cache_dir: "datasets/VLSP2013-POS",
        filename: "train.txt",
        source: Source::CallerSupplied,
        archive: Archive::Zip,
    },
    Entry {
        name: "VTB-CHUNK",
        category: "Chunking",
        license: License::Closed,
        year: 2006,
        cache_dir: "datasets/VTB-CHUNK",
        filename: "train.txt",
        source: Source::CallerSupplied,
        archive: Archive::Zip,
    },
    Entry {
        name: "VLSP2016-NER",
        category: "NER",
        license: License::Closed,
        year: 2016,
        cache_dir: "datasets/VLSP2016-NER",
        filename: "train.txt",
        source: Source::CallerSupplied,
        archive: Archive::Zip,
    },
    Entry {
        name: "VLSP2018-NER",
        category: "NER",
        license: License::Closed,
        year: 2018,
        cache_dir: "datasets/VLSP2018-NER",
        filename: "train.txt",
        source: Source::CallerSupplied,
        archive: Archive::Zip,
    },
    Entry {
        name: "AIVIVN2019_SA",
        category: "Sentiment",
        license: License::Closed,
        year: 2019,
        cache_dir: "datasets/aivivn2019_sa",
        filename: "train.txt",
        source: Source::CallerSupplied,
        archive: Archive::Zip,
    },
];

/// An ordered, read-only table of datasets.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Build a registry from `entries`, kept in the given order.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// The datasets known to this crate.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.to_vec())
    }

    /// Look a dataset up by name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Whether `name` is a known dataset.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_lookup() {
        let registry = Registry::builtin();
        assert!(registry.contains("VNTC"));
        assert!(!registry.contains("vntc"));
        assert!(registry.get("MISSING").is_none());

        let entry = registry.get("AIVIVN2019_SA").unwrap();
        assert_eq!(entry.license, License::Closed);
        assert_eq!(entry.source, Source::CallerSupplied);
        assert_eq!(entry.year, 2019);
    }

    #[test]
    fn closed_datasets_have_no_public_url() {
        for entry in Registry::builtin().iter() {
            let public = matches!(entry.source, Source::Public(_));
            assert_eq!(public, !entry.license.is_restricted(), "{}", entry.name);
        }
    }

    #[test]
    fn cache_paths_are_distinct_and_stable() {
        let root = Path::new("/cache");
        let registry = Registry::builtin();
        let mut seen = HashSet::new();
        for entry in registry.iter() {
            let path = entry.cache_path(root);
            assert_eq!(path, root.join(entry.cache_dir).join(entry.filename));
            assert_eq!(path, entry.cache_path(root));
            assert!(seen.insert(path), "duplicate cache path for {}", entry.name);
        }
    }

    #[test]
    fn definition_order() {
        let names: Vec<_> = Registry::builtin().iter().map(|e| e.name).collect();
        assert_eq!(names.first(), Some(&"VNESES"));
        assert_eq!(names.last(), Some(&"AIVIVN2019_SA"));
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn license_display() {
        assert_eq!(License::Open.to_string(), "Open");
        assert_eq!(License::Closed.to_string(), "Close");
        assert!(License::Closed.is_restricted());
    }
}
