//! Sitesmith CLI
//!
//! `sitesmith build` runs the full pipeline for a business description and
//! writes the generated site to disk; `refine` and `variants` run the
//! post-build services; `cache-clear` empties the response cache.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sitesmith::{
    build_pipeline, build_refinement_service, AppConfig, BuildRecord, VersionStore,
};
use sitesmith_core::StageCallback;
use sitesmith_llm::cache::DEFAULT_TTL;
use sitesmith_llm::ResponseCache;
use sitesmith_pipeline::RunTotals;

#[derive(Parser)]
#[command(name = "sitesmith", version, about = "Multi-agent website generator")]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a complete website from a business description
    Build {
        /// What the business does, in a sentence or two
        description: String,
        /// Site template: saas, restaurant, portfolio, ecommerce, agency, landing
        #[arg(long)]
        template: Option<String>,
        /// Output language (ISO code or English name)
        #[arg(long)]
        language: Option<String>,
        /// Skip the review/fix loop
        #[arg(long)]
        no_auto_fix: bool,
        /// Cap on corrective fix iterations
        #[arg(long)]
        max_fix_iterations: Option<u32>,
        /// Where to write the generated HTML
        #[arg(short, long, default_value = "site.html")]
        output: PathBuf,
        /// Project id for version history
        #[arg(long, default_value = "default")]
        project: String,
    },
    /// Apply instructions to an existing HTML file
    Refine {
        /// HTML file to modify
        input: PathBuf,
        /// What to change
        instructions: String,
        /// Output path (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Project id for version history
        #[arg(long, default_value = "default")]
        project: String,
    },
    /// Generate A/B copy variants from a copy file
    Variants {
        /// File containing the original website copy
        copy_file: PathBuf,
    },
    /// Remove all cached provider responses
    CacheClear,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitesmith")
}

fn print_totals(totals: &RunTotals) {
    println!(
        "Totals: {} tokens, ${:.4}, {:.1}s of model time",
        totals.tokens,
        totals.cost_usd,
        totals.duration_ms / 1000.0
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Build {
            description,
            template,
            language,
            no_auto_fix,
            max_fix_iterations,
            output,
            project,
        } => {
            if let Some(template) = template {
                config.pipeline.template = template;
            }
            if let Some(language) = language {
                config.pipeline.language = language;
            }
            if no_auto_fix {
                config.pipeline.auto_fix = false;
            }
            if let Some(cap) = max_fix_iterations {
                config.pipeline.max_fix_iterations = cap;
            }

            let progress: StageCallback = std::sync::Arc::new(|stage, status| {
                println!("  [{}] {}", status, stage);
            });
            let pipeline = build_pipeline(&config)?.with_stage_callback(progress);

            println!("Building website...");
            let outcome = pipeline.run(&description).await;
            print_totals(&outcome.totals);

            if !outcome.success {
                bail!(
                    "build failed: {}",
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }

            fs::write(&output, &outcome.html)
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "Wrote {} ({} fix iterations)",
                output.display(),
                outcome.fix_iterations
            );

            let record = BuildRecord::from_outcome(&description, &outcome);
            record.save(&data_dir().join("builds"))?;

            let store = VersionStore::new(data_dir().join("versions"));
            store.save_version(
                &project,
                outcome.html,
                "Initial build".to_string(),
                outcome.totals.tokens,
                outcome.totals.cost_usd,
            )?;
        }

        Command::Refine {
            input,
            instructions,
            output,
            project,
        } => {
            let html = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let service = build_refinement_service(&config)?;

            println!("Refining...");
            let outcome = service.refine(&html, &instructions).await;
            let mut totals = RunTotals::default();
            totals.add(&outcome);
            print_totals(&totals);

            if !outcome.success {
                bail!(
                    "refinement failed: {}",
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
            let refined = outcome
                .output
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or(&outcome.raw_text)
                .to_string();

            let target = output.unwrap_or(input);
            fs::write(&target, &refined)
                .with_context(|| format!("writing {}", target.display()))?;
            println!("Wrote {}", target.display());

            let store = VersionStore::new(data_dir().join("versions"));
            store.save_version(
                &project,
                refined,
                instructions,
                outcome.total_tokens(),
                outcome.cost_usd,
            )?;
        }

        Command::Variants { copy_file } => {
            let copy = fs::read_to_string(&copy_file)
                .with_context(|| format!("reading {}", copy_file.display()))?;
            let service = build_refinement_service(&config)?;

            let outcome = service.ab_variants(&copy).await;
            if !outcome.success {
                bail!(
                    "variant generation failed: {}",
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
            let variants = outcome.output.unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&variants)?);
        }

        Command::CacheClear => {
            let cache = ResponseCache::new(config.cache_dir(), DEFAULT_TTL);
            let cleared = cache.clear();
            println!("Cleared {} cached responses", cleared);
        }
    }

    Ok(())
}
