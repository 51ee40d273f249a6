//! nlp-datasets - download and inspect labeled NLP datasets
//!
//! ```bash
//! # Datasets with an open license
//! nlp-datasets list
//!
//! # Every dataset, closed license ones need a URL
//! nlp-datasets list --all
//! nlp-datasets download VNTC
//! nlp-datasets download AIVIVN2019_SA --url https://.../AIVIVN2019_SA.zip
//!
//! # Split sizes and labels of a corpus
//! nlp-datasets load aivivn2019_sa_sample
//!
//! nlp-datasets remove VNTC
//! ```
use clap::{Parser, Subcommand};
use nlp_datasets::{Config, DataFetcher, DatasetError, Download, NlpData};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Download, cache and load labeled text datasets
#[derive(Parser)]
#[command(name = "nlp-datasets", version, about)]
struct Cli {
    /// Cache root, defaults to $NLP_DATASETS_CACHE or the user cache directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download a dataset into the cache
    Download {
        /// Dataset name, see `list --all`
        name: String,
        /// Download URL, required for closed license datasets
        #[arg(long)]
        url: Option<String>,
    },
    /// List known datasets
    List {
        /// Include closed license datasets
        #[arg(long)]
        all: bool,
    },
    /// Delete a dataset from the cache
    Remove {
        /// Dataset name
        name: String,
    },
    /// Load a corpus and print its statistics
    Load {
        /// Corpus identifier, e.g. aivivn2019_sa_sample
        corpus: String,
    },
}

fn run(cli: Cli) -> Result<(), DatasetError> {
    let mut config = Config::from_env()?;
    if let Some(cache_dir) = cli.cache_dir {
        config = config.with_cache_root(cache_dir);
    }
    let fetcher = DataFetcher::new(config)?;

    match cli.command {
        Command::Download { name, url } => match fetcher.download(&name, url.as_deref())? {
            Download::Fetched(path) => println!("Downloaded '{name}' to {}", path.display()),
            Download::AlreadyCached(path) => {
                println!("Data is already existed: '{name}' in {}", path.display())
            }
        },
        Command::List { all } => println!("{}", fetcher.list(all)),
        Command::Remove { name } => {
            fetcher.remove(&name)?;
            println!("Dataset {name} is removed.");
        }
        Command::Load { corpus } => {
            let id: NlpData = corpus.parse()?;
            let corpus = fetcher.load_corpus(id)?;
            let stats = corpus.stats();
            println!("{corpus}");
            for (label, count) in &stats.label_counts {
                println!("  {label}: {count}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Library logs go through `log`, forwarded to the subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_notice() => {
            println!("{err}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
