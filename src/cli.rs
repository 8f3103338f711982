//! CLI argument parsing for Langgram

use crate::locale::Locale;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// One reference corpus: `LOCALE=PATH`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusArg {
    pub locale: Locale,
    pub path: PathBuf,
}

fn parse_corpus(value: &str) -> Result<CorpusArg, String> {
    let (tag, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected LOCALE=PATH, got '{}'", value))?;
    if path.is_empty() {
        return Err(format!("missing path for corpus '{}'", tag));
    }
    let locale = Locale::parse(tag).map_err(|e| e.to_string())?;
    Ok(CorpusArg {
        locale,
        path: PathBuf::from(path),
    })
}

fn parse_locale(value: &str) -> Result<Locale, String> {
    Locale::parse(value).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "langgram")]
#[command(version)]
#[command(
    about = "Character n-gram language profiles with k-fold cross-validation",
    long_about = None
)]
pub struct Cli {
    /// Reference corpus as LOCALE=PATH (repeatable)
    #[arg(long = "corpus", value_name = "LOCALE=PATH", value_parser = parse_corpus)]
    pub corpus: Vec<CorpusArg>,

    /// Labeled sample to cross-validate
    #[arg(
        short = 's',
        long = "sample",
        value_name = "PATH",
        required_unless_present = "profile_only"
    )]
    pub sample: Option<PathBuf>,

    /// Language of the sample (e.g. de, pt-BR)
    #[arg(
        short = 'l',
        long = "language",
        value_name = "LOCALE",
        value_parser = parse_locale,
        required_unless_present = "profile_only"
    )]
    pub language: Option<Locale>,

    /// Number of folds (overrides the config file, minimum 3)
    #[arg(short = 'k', long = "folds", value_name = "K")]
    pub folds: Option<usize>,

    /// Cut the sample into fixed-size chunks instead of whole words
    #[arg(long = "break-words")]
    pub break_words: bool,

    /// Drop grams seen fewer than N times when building profiles (0 and 1 keep all)
    #[arg(long = "min-frequency", value_name = "N", default_value = "1")]
    pub min_frequency: u64,

    /// Detector RNG seed (overrides the config file)
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only build the reference profiles and print their summary
    #[arg(long = "profile-only")]
    pub profile_only: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
