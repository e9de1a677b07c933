//! Grave Plot Report CLI
//!
//! Loads a grave plot GeoJSON file and prints the graveyard statistics,
//! the status color legend and, on request, the extent of one graveyard.
//!
//! Usage:
//!   plot-report assets/graves.geojson
//!   plot-report assets/graves.geojson --locate Buschhoven --format json

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use grave_plots::{GraveyardDirectory, PlotConfig, PlotError, PlotLayer};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plot-report")]
#[command(about = "Classify grave plots and report graveyard statistics")]
struct Cli {
    /// GeoJSON file with grave plot features
    input: PathBuf,

    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,

    /// Graveyard whose plots are counted separately
    #[arg(short, long)]
    target_group: Option<String>,

    /// Graveyard to locate and frame
    #[arg(short, long)]
    locate: Option<String>,

    /// Graveyard listing from the registry API (JSON array)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = PlotConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    if let Some(target) = cli.target_group {
        config.classify.target_group = target;
        config.validate()?;
    }

    let mut layer = PlotLayer::new(&config);
    layer
        .reload_from_path(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    let report = layer.report()?;

    let located = cli.locate.as_deref().map(|name| (name, layer.frame_group(name)));

    let directory = match &cli.directory {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(GraveyardDirectory::from_str(&raw)?)
        }
        None => None,
    };

    match cli.format {
        OutputFormat::Json => {
            let mut out = serde_json::to_value(&report)?;
            if let Some((name, result)) = &located {
                out["located"] = match result {
                    Ok(region) => json!({ "group": name, "extent": region }),
                    Err(PlotError::NotFound { .. }) => json!({
                        "group": name,
                        "extent": null,
                        "suggestions": layer.suggest(name, 5),
                    }),
                    Err(e) => bail!("{}", e),
                };
            }
            if let Some(dir) = &directory {
                out["directory"] = json!(dir.names());
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print!("{}", report);
            if let Some((name, result)) = &located {
                println!();
                match result {
                    Ok(Some(region)) => {
                        let (cx, cy) = region.center();
                        println!("{} extent ({}):", name, config.projection.code());
                        println!(
                            "  [{:.2}, {:.2}, {:.2}, {:.2}]",
                            region.min_x, region.min_y, region.max_x, region.max_y
                        );
                        println!(
                            "  center ({:.2}, {:.2}), {:.2} x {:.2}",
                            cx,
                            cy,
                            region.width(),
                            region.height()
                        );
                    }
                    Ok(None) => println!("{}: first plot has no geometry to frame", name),
                    Err(PlotError::NotFound { .. }) => {
                        println!("{}: not found", name);
                        let suggestions = layer.suggest(name, 5);
                        if !suggestions.is_empty() {
                            println!("  did you mean: {}", suggestions.join(", "));
                        }
                    }
                    Err(e) => bail!("{}", e),
                }
            }
            if let Some(dir) = &directory {
                println!();
                println!("Registry graveyards ({} rows):", dir.len());
                for name in dir.names().iter() {
                    println!("  {}", name);
                }
            }
        }
    }

    Ok(())
}
