//! Grave Plot Config CLI
//!
//! View and manage grave plot configuration.

use clap::{Parser, Subcommand};
use grave_plots::PlotConfig;

#[derive(Parser)]
#[command(name = "plot-config")]
#[command(about = "View and manage grave plot configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path
        #[arg(short, long, default_value = "graves.toml")]
        output: String,
    },

    /// Validate configuration
    Validate {
        /// Config file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = PlotConfig::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", cfg.to_toml()?);
            } else {
                println!("Grave Plot Configuration\n");
                println!("Projection: {}", cfg.projection.code());

                println!("\nClassify:");
                println!("  Target graveyard: {}", cfg.classify.target_group);

                println!("\nAttributes:");
                println!("  Graveyard: {}", cfg.attributes.group);
                println!("  Plot id: {}", cfg.attributes.plot_id);
                println!("  Occupant: {}", cfg.attributes.occupant_id);
                println!("  Status: {}", cfg.attributes.status);
                println!("  Plot code: {}", cfg.attributes.plot_code);

                println!("\nStyle:");
                let palette: Vec<&str> =
                    cfg.style.palette.colors().iter().map(|c| c.as_str()).collect();
                println!("  Palette: {}", palette.join(", "));
                println!("  Fallback: {}", cfg.style.fallback);
                println!("  Stroke: {} {}", cfg.style.stroke.color, cfg.style.stroke.width);
            }
        }

        Commands::Init { output } => {
            let cfg = PlotConfig::default();
            cfg.save(&output)?;
            println!("Created config file: {}", output);
        }

        Commands::Validate { config } => {
            match PlotConfig::load_from(config.as_deref()) {
                Ok(cfg) => {
                    println!("Configuration is valid");
                    println!("   Target graveyard: {}", cfg.classify.target_group);
                    println!("   Palette size: {}", cfg.style.palette.len());
                }
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
