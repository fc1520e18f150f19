use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use taxonomy_classifier::{
    CategoryExtractor, CategorySet, CsvRowSource, ExclusionPolicy, RuleConfig,
    DEFAULT_DELIMITER, DEFAULT_FIELD,
};

#[derive(Serialize)]
struct CategoryReport<'a> {
    rows: usize,
    categories: &'a CategorySet,
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    topics: &'a [String],
    domains: &'a [String],
}

/// Discover taxonomy categories and classify topics into domains.
#[derive(Parser)]
#[command(name = "taxonomy-classifier", version, about)]
struct Cli {
    /// Rule file replacing the built-in exclusion list and domain table
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect category tokens from the path column of a CSV file
    Categories {
        /// CSV file with a header row
        csv: PathBuf,

        /// Column holding the taxonomy path
        #[arg(long, default_value = DEFAULT_FIELD)]
        field: String,

        /// Path delimiter
        #[arg(long, default_value = DEFAULT_DELIMITER)]
        delimiter: String,

        /// Keep the first data record instead of skipping it
        #[arg(long)]
        no_skip_first: bool,

        /// Drop tokens that match any exclusion pattern
        #[arg(long)]
        match_any: bool,
    },

    /// Classify topics into domains
    Classify {
        /// Topics to classify
        #[arg(required = true)]
        topics: Vec<String>,

        /// Report each matching domain once
        #[arg(long)]
        distinct: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taxonomy_classifier=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.rules {
        Some(path) => RuleConfig::from_file(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => RuleConfig::default(),
    };

    match cli.command {
        Commands::Categories {
            csv,
            field,
            delimiter,
            no_skip_first,
            match_any,
        } => {
            let policy = if match_any {
                ExclusionPolicy::MatchesAny
            } else {
                ExclusionPolicy::MatchesEvery
            };
            let rows = CsvRowSource::from_path(&csv)?;
            let mut categories = CategorySet::new();
            let processed = CategoryExtractor::new(config.exclusions)
                .with_field(field)
                .with_delimiter(delimiter)
                .with_skip_first_record(!no_skip_first)
                .with_policy(policy)
                .extract_into(rows, &mut categories)
                .with_context(|| format!("extracting categories from {}", csv.display()))?;
            info!("Found {} categories in {} rows", categories.len(), processed);

            if cli.json {
                let report = CategoryReport {
                    rows: processed,
                    categories: &categories,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for category in &categories {
                    println!("{category}");
                }
            }
        }
        Commands::Classify { topics, distinct } => {
            let domains = if distinct {
                config.domains.classify_distinct(&topics)
            } else {
                config.domains.classify(&topics)
            };

            if cli.json {
                let report = ClassifyReport {
                    topics: &topics,
                    domains: &domains,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for domain in &domains {
                    println!("{domain}");
                }
            }
        }
    }

    Ok(())
}
