//! medmatch: branded vs. generic medicine finder
//!
//! Searches a medicine catalog by brand or generic name, lists cheaper
//! generic alternatives and estimates savings.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use medmatch::{
    cli::{self, SavingsArgs, SearchArgs},
    config::{self, AppConfig, ConfigPreset, OutputFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medmatch")]
#[command(version)]
#[command(about = "Find generic equivalents and alternatives for branded medicines", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  No medicine matched the name or query
    2  Invalid input (query too short, bad prices, unreadable feed)

EXAMPLES:
    # Fuzzy search by brand or generic name
    medmatch search tylen

    # Exact lookup with prices adjusted for a locality
    medmatch show Lipitor --locality us-ny

    # Cheaper alternatives sharing an indication
    medmatch alternatives Crestor --limit 3 --format json

    # Merge a regulatory export into the catalog and report counts
    medmatch --preset dedup refresh fda-export.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "MEDMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration preset (default, compat, dedup)
    #[arg(long, global = true)]
    preset: Option<String>,

    /// JSON catalog replacing the packaged dataset
    #[arg(long, global = true, env = "MEDMATCH_CATALOG")]
    catalog: Option<PathBuf>,

    /// Extra JSON feed appended at startup (repeatable)
    #[arg(long = "extra-feed", global = true)]
    extra_feeds: Vec<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long, global = true)]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search medicines by brand or generic name
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of results (negative returns none)
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Locality code for adjusted prices (e.g. us-ny)
        #[arg(long)]
        locality: Option<String>,

        /// Show the score and matched field of each result
        #[arg(long)]
        explain: bool,
    },

    /// Show one medicine by exact brand or generic name
    Show {
        /// Brand or generic name
        name: String,

        /// Locality code for adjusted prices
        #[arg(long)]
        locality: Option<String>,
    },

    /// List alternatives with a different generic for the same indication
    Alternatives {
        /// Brand or generic name of the base medicine
        name: String,

        /// Maximum number of alternatives (negative returns none)
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Print catalog size and price averages
    Stats,

    /// List known locality codes and multipliers
    Localities,

    /// Merge a JSON feed into the catalog and print the merge report
    Refresh {
        /// JSON feed document (array of rows)
        feed: PathBuf,

        /// Read at most this many rows from the feed
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Estimate yearly savings of the generic over the brand
    Savings {
        /// Brand price per prescription
        #[arg(long)]
        brand_price: Option<f64>,

        /// Generic price per prescription
        #[arg(long)]
        generic_price: Option<f64>,

        /// Prescriptions filled per year (default: 12)
        #[arg(long)]
        per_year: Option<u32>,

        /// Medicine name; its catalog prices fill in omitted prices
        #[arg(long)]
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .medmatch.yaml in the current directory
    Init,
}

impl Cli {
    /// Global flags as a config layered over the file config.
    fn overrides(&self) -> Result<AppConfig> {
        let mut overrides = match self.preset {
            Some(ref name) => {
                let preset = ConfigPreset::from_name(name).with_context(|| {
                    let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                    format!("unknown preset '{name}' (expected one of: {})", known.join(", "))
                })?;
                AppConfig::from_preset(preset)
            }
            None => AppConfig::default(),
        };

        overrides.catalog.path.clone_from(&self.catalog);
        overrides
            .catalog
            .extra_feeds
            .extend(self.extra_feeds.iter().cloned());
        if let Some(format) = self.format {
            overrides.output.format = format;
        }
        overrides.output.file.clone_from(&self.output_file);
        overrides.output.no_color = self.no_color;
        Ok(overrides)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let overrides = cli.overrides()?;
    let (app_config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(ref path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    // Dispatch to command handlers
    let exit_code = match cli.command {
        Commands::Search {
            query,
            limit,
            locality,
            explain,
        } => {
            let matcher = app_config.build_matcher()?;
            let args = SearchArgs {
                query,
                limit,
                locality,
                explain,
            };
            cli::run_search(&matcher, &app_config, &args)?
        }

        Commands::Show { name, locality } => {
            let matcher = app_config.build_matcher()?;
            cli::run_show(&matcher, &app_config, &name, locality.as_deref())?
        }

        Commands::Alternatives { name, limit } => {
            let matcher = app_config.build_matcher()?;
            cli::run_alternatives(&matcher, &app_config, &name, limit)?
        }

        Commands::Stats => {
            let matcher = app_config.build_matcher()?;
            cli::run_stats(&matcher, &app_config)?
        }

        Commands::Localities => {
            let matcher = app_config.build_matcher()?;
            cli::run_localities(&matcher, &app_config)?
        }

        Commands::Refresh { feed, limit } => {
            let matcher = app_config.build_matcher()?;
            cli::run_refresh(&matcher, &app_config, &feed, limit)?
        }

        Commands::Savings {
            brand_price,
            generic_price,
            per_year,
            name,
        } => {
            let matcher = app_config.build_matcher()?;
            let args = SavingsArgs {
                brand_price,
                generic_price,
                per_year,
                name,
            };
            cli::run_savings(&matcher, &app_config, &args)?
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "medmatch", &mut io::stdout());
            cli::EXIT_SUCCESS
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            cli::EXIT_SUCCESS
        }

        Commands::Config { action } => {
            run_config_action(action, &app_config, loaded_from, cli.config.as_deref())?;
            cli::EXIT_SUCCESS
        }
    };

    if exit_code != cli::EXIT_SUCCESS {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn run_config_action(
    action: ConfigAction,
    app_config: &AppConfig,
    loaded_from: Option<PathBuf>,
    explicit: Option<&std::path::Path>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(app_config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                config::user_config_dir().map(|p| p.display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in &[
                ".medmatch.yaml",
                ".medmatch.yml",
                "medmatch.yaml",
                "medmatch.yml",
            ] {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".medmatch.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
