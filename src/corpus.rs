//! Labeled sentences and classification corpora.
//!
//! Corpus files hold one sentence per line. Labels are written inline as `__label__<tag>`
//! anywhere in the line:
//!
//! ```text
//! __label__positive Sản phẩm rất tốt
//! giao hàng chậm __label__negative
//! ```
use crate::{Config, Dataset, DatasetError};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix marking a label inside a line.
pub const LABEL_MARKER: &str = "__label__";

/// A marker followed by at least one word character. The label itself may run into the next
/// marker since `_` is a word character, [`parse_line`] splits it there.
static LABEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__label__\w+").expect("label pattern is valid"));

/// A classification tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    /// Create a label.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The tag text.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A piece of text and the labels attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    labels: Vec<Label>,
}

impl Sentence {
    /// Create a sentence.
    pub fn new(text: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            text: text.into(),
            labels,
        }
    }

    /// The text, without label tags.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Labels in the order they appeared.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl Dataset for Vec<Sentence> {
    type Item = Sentence;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<Self::Item> {
        self.as_slice().get(index).cloned()
    }
}

/// Parse one line of a classification file.
///
/// Every `__label__<tag>` is collected, in order and with duplicates, then removed from the
/// line. Whitespace around a removed tag stays where it was, except when the tag opened or
/// closed the line: the whitespace it leaves dangling on that edge is trimmed. A line without
/// tags is kept verbatim.
///
/// ```
/// use nlp_datasets::parse_line;
///
/// let sentence = parse_line("great __label__positive product");
/// assert_eq!(sentence.text(), "great  product");
/// assert_eq!(sentence.labels()[0].value(), "positive");
/// ```
pub fn parse_line(line: &str) -> Sentence {
    let tags: Vec<_> = LABEL_PATTERN.find_iter(line).collect();
    let mut labels = Vec::new();
    for tag in &tags {
        // `__label__a__label__b` is two tags.
        labels.extend(
            tag.as_str()
                .split(LABEL_MARKER)
                .filter(|value| !value.is_empty())
                .map(Label::new),
        );
    }
    let (Some(first), Some(last)) = (tags.first(), tags.last()) else {
        return Sentence::new(line, labels);
    };

    let residual = LABEL_PATTERN.replace_all(line, "");
    let mut text: &str = &residual;
    // Only the side a tag was removed from is trimmed.
    if first.start() == 0 {
        text = text.trim_start();
    }
    if last.end() == line.len() {
        text = text.trim_end();
    }
    Sentence::new(text, labels)
}

/// Read a classification file, one [`Sentence`] per line.
pub fn read_text_classification_file(path: &Path) -> Result<Vec<Sentence>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::ReadSplit {
        path: path.to_path_buf(),
        source,
    })?;
    let sentences: Vec<Sentence> = content.lines().map(parse_line).collect();
    debug!("Read {} sentences from {path:?}", sentences.len());
    Ok(sentences)
}

/// Train, dev and test splits of labeled sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedCorpus {
    /// Training sentences.
    pub train: Vec<Sentence>,
    /// Development sentences.
    pub dev: Vec<Sentence>,
    /// Test sentences.
    pub test: Vec<Sentence>,
}

/// Summary numbers of a [`CategorizedCorpus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    /// Number of training sentences.
    pub train: usize,
    /// Number of development sentences.
    pub dev: usize,
    /// Number of test sentences.
    pub test: usize,
    /// Occurrences of each label over all splits.
    pub label_counts: BTreeMap<Label, usize>,
}

impl CategorizedCorpus {
    /// Create a corpus from its splits.
    pub fn new(train: Vec<Sentence>, dev: Vec<Sentence>, test: Vec<Sentence>) -> Self {
        Self { train, dev, test }
    }

    /// All sentences, train then dev then test.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.train.iter().chain(&self.dev).chain(&self.test)
    }

    /// Distinct labels, in order of first appearance.
    pub fn labels(&self) -> Vec<Label> {
        let mut labels: Vec<Label> = Vec::new();
        for label in self.sentences().flat_map(Sentence::labels) {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        labels
    }

    /// Split sizes and label frequencies.
    pub fn stats(&self) -> CorpusStats {
        let mut label_counts = BTreeMap::new();
        for label in self.sentences().flat_map(Sentence::labels) {
            *label_counts.entry(label.clone()).or_insert(0) += 1;
        }
        CorpusStats {
            train: self.train.len(),
            dev: self.dev.len(),
            test: self.test.len(),
            label_counts,
        }
    }
}

impl fmt::Display for CategorizedCorpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CategorizedCorpus: {} train + {} dev + {} test sentences",
            self.train.len(),
            self.dev.len(),
            self.test.len()
        )
    }
}

/// Read `train.txt`, `dev.txt` and `test.txt` from `data_folder`.
pub fn load_classification_corpus(data_folder: &Path) -> Result<CategorizedCorpus, DatasetError> {
    let train = read_text_classification_file(&data_folder.join("train.txt"))?;
    let dev = read_text_classification_file(&data_folder.join("dev.txt"))?;
    let test = read_text_classification_file(&data_folder.join("test.txt"))?;
    let corpus = CategorizedCorpus::new(train, dev, test);
    info!("Loaded {corpus} from {data_folder:?}");
    Ok(corpus)
}

/// Corpora that can be loaded by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NlpData {
    /// AIVIVN 2019 sentiment analysis, downloaded into the cache.
    Aivivn2019Sa,
    /// A small sample of AIVIVN 2019 sentiment analysis shipped with this crate.
    Aivivn2019SaSample,
}

impl NlpData {
    /// All identifiers.
    pub const ALL: [NlpData; 2] = [NlpData::Aivivn2019Sa, NlpData::Aivivn2019SaSample];

    /// The identifier string, e.g. `aivivn2019_sa`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NlpData::Aivivn2019Sa => "aivivn2019_sa",
            NlpData::Aivivn2019SaSample => "aivivn2019_sa_sample",
        }
    }

    /// The folder holding the corpus files.
    pub fn data_folder(&self, config: &Config) -> PathBuf {
        match self {
            NlpData::Aivivn2019Sa => config.cache_root.join("datasets").join(self.as_str()),
            NlpData::Aivivn2019SaSample => config.sample_root.join(self.as_str()),
        }
    }
}

impl fmt::Display for NlpData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NlpData {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NlpData::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DatasetError::UnknownCorpus(s.to_string()))
    }
}

/// Load the corpus named by `id`.
pub fn load_corpus(config: &Config, id: NlpData) -> Result<CategorizedCorpus, DatasetError> {
    load_classification_corpus(&id.data_folder(config))
}
