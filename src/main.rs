use anyhow::{Context, Result};
use clap::Parser;
use langgram::cli::{Cli, CorpusArg, OutputFormat};
use langgram::{CrossValidator, LanggramConfig, LanguageProfile, NgramExtractor, ProfileBuilder};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(args: &Cli) -> Result<LanggramConfig> {
    let mut config = match &args.config {
        Some(path) => LanggramConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LanggramConfig::default(),
    };

    if let Some(k) = args.folds {
        config.validation.k = k;
    }
    if args.break_words {
        config.validation.break_words = true;
    }
    if let Some(seed) = args.seed {
        config.detector.seed = seed;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn build_profiles(
    corpora: &[CorpusArg],
    extractor: &NgramExtractor,
    min_frequency: u64,
) -> Result<Vec<LanguageProfile>> {
    corpora
        .iter()
        .map(|corpus| -> Result<LanguageProfile> {
            let text = read_text(&corpus.path)?;
            let mut builder = ProfileBuilder::new(corpus.locale.clone())
                .extractor(extractor.clone())
                .min_frequency(min_frequency);
            builder.add_text(&text);
            Ok(builder.build())
        })
        .collect()
}

fn print_profiles(profiles: &[LanguageProfile], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for profile in profiles {
                println!("{}", profile);
                for len in profile.gram_lengths() {
                    let stats = profile.stats(len);
                    println!(
                        "  {}-grams: {} distinct, {} total, min {}, max {}",
                        len,
                        profile.num_grams_of_length(len)?,
                        stats.occurrences,
                        stats.min_count,
                        stats.max_count
                    );
                }
            }
        }
        OutputFormat::Json => {
            let summaries = profiles
                .iter()
                .map(|profile| -> Result<serde_json::Value> {
                    let lengths = profile
                        .gram_lengths()
                        .into_iter()
                        .map(|len| -> Result<serde_json::Value> {
                            Ok(serde_json::json!({
                                "gram_length": len,
                                "distinct": profile.num_grams_of_length(len)?,
                                "stats": profile.stats(len),
                            }))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(serde_json::json!({
                        "locale": profile.locale(),
                        "num_grams": profile.num_grams(),
                        "lengths": lengths,
                    }))
                })
                .collect::<Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let extractor = config.extraction.extractor()?;
    let profiles = build_profiles(&args.corpus, &extractor, args.min_frequency)?;

    if args.profile_only {
        return print_profiles(&profiles, args.format);
    }

    let (Some(sample_path), Some(language)) = (&args.sample, &args.language) else {
        anyhow::bail!("--sample and --language are required unless --profile-only is given");
    };
    let sample = read_text(sample_path)?;

    let builder = ProfileBuilder::new(language.clone())
        .extractor(extractor.clone())
        .min_frequency(args.min_frequency);
    let mut validator = CrossValidator::new(config.validation.clone())?
        .with_profiles(profiles)
        .with_builder(builder)
        .with_sample(sample);

    let report = validator
        .run_with_detector(&extractor, &config.detector)
        .with_context(|| format!("Cross-validation of {} failed", sample_path.display()))?;

    match args.format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
