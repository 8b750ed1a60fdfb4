use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

use fw_scraper::{
    extract_candidates, extract_records, DedupRegistry, DeviceContext, FirmwareRecord,
    PipelineItem, Settings, SharedRegistry,
};

#[derive(Parser)]
#[command(name = "fw_scraper", about = "Firmware release extraction from support articles")]
struct Cli {
    /// Settings file (json, toml, yaml); FW_* environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract firmware records from one article ("-" reads stdin)
    Extract {
        input: PathBuf,
        #[arg(long)]
        device_name: String,
        #[arg(long)]
        device_class: String,
        /// Defaults to the configured vendor
        #[arg(long)]
        vendor: Option<String>,
        /// Emit list-wrapped items for the download pipeline
        #[arg(long)]
        pipeline: bool,
    },
    /// Extract from every article in a JSON-lines manifest, deduplicating across all of them
    Batch {
        manifest: PathBuf,
        /// Process articles on the rayon pool with a shared registry
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        pipeline: bool,
    },
    /// Show how each section of an article is classified
    Inspect { input: PathBuf },
}

/// One manifest line: where the article text lives and which device it belongs to.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    device_name: String,
    device_class: String,
    vendor: Option<String>,
    path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Commands::Extract {
            input,
            device_name,
            device_class,
            vendor,
            pipeline,
        } => {
            let markup = read_input(&input)?;
            let ctx = DeviceContext {
                device_name,
                device_class,
                vendor: vendor.unwrap_or_else(|| settings.vendor.clone()),
            };
            let records = extract_records(&markup, &ctx, &mut DedupRegistry::new(), &settings);
            write_records(records, pipeline)?;
        }
        Commands::Batch {
            manifest,
            parallel,
            pipeline,
        } => {
            let entries = read_manifest(&manifest)?;
            if entries.is_empty() {
                eprintln!("Manifest is empty.");
                return Ok(());
            }
            let base = manifest.parent().unwrap_or(Path::new("."));
            let articles = entries
                .into_iter()
                .map(|e| -> Result<(DeviceContext, String)> {
                    let path = base.join(&e.path);
                    let markup = read_input(&path)?;
                    let ctx = DeviceContext {
                        device_name: e.device_name,
                        device_class: e.device_class,
                        vendor: e.vendor.unwrap_or_else(|| settings.vendor.clone()),
                    };
                    Ok((ctx, markup))
                })
                .collect::<Result<Vec<_>>>()?;

            let records = run_batch(&articles, parallel, &settings)?;
            eprintln!(
                "Extracted {} records from {} articles.",
                records.len(),
                articles.len()
            );
            write_records(records, pipeline)?;
        }
        Commands::Inspect { input } => {
            let markup = read_input(&input)?;
            let candidates = extract_candidates(&markup, &settings);
            if candidates.is_empty() {
                println!("No release sections found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<32} | {:<15} | {:<12} | {:<10} | {}",
                "#", "Heading", "Category", "Version", "Date", "URL"
            );
            println!("{}", "-".repeat(110));
            for (i, c) in candidates.iter().enumerate() {
                let category = serde_json::to_value(c.category)?;
                let date = c
                    .entry
                    .release_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:>3} | {:<32} | {:<15} | {:<12} | {:<10} | {}",
                    i + 1,
                    truncate(&c.entry.heading, 32),
                    category.as_str().unwrap_or("?"),
                    c.entry.version,
                    date,
                    c.entry.url.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    info!("Done in {:.2}s", t0.elapsed().as_secs_f64());
    Ok(())
}

/// Articles in manifest order. With `parallel`, which of two articles sharing an
/// artifact gets to emit it depends on scheduling.
fn run_batch(
    articles: &[(DeviceContext, String)],
    parallel: bool,
    settings: &Settings,
) -> Result<Vec<FirmwareRecord>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(articles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let records: Vec<FirmwareRecord> = if parallel {
        let shared = SharedRegistry::new();
        let per_article: Vec<_> = articles
            .par_iter()
            .map(|(ctx, markup)| {
                let mut registry = &shared;
                let records = extract_records(markup, ctx, &mut registry, settings);
                pb.inc(1);
                records
            })
            .collect();
        info!("{} distinct artifacts", shared.len());
        per_article.into_iter().flatten().collect()
    } else {
        let mut registry = DedupRegistry::new();
        let mut records = Vec::new();
        for (ctx, markup) in articles {
            records.extend(extract_records(markup, ctx, &mut registry, settings));
            pb.inc(1);
        }
        info!("{} distinct artifacts", registry.len());
        records
    };

    pb.finish_and_clear();
    Ok(records)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open manifest {}", path.display()))?;
    let mut entries = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: ManifestEntry = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: bad manifest line", path.display(), n + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

fn write_records(records: Vec<FirmwareRecord>, pipeline: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in records {
        if pipeline {
            serde_json::to_writer(&mut out, &PipelineItem::from(record))?;
        } else {
            serde_json::to_writer(&mut out, &record)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
