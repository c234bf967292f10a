// SPDX-License-Identifier: PMPL-1.0-or-later

//! langdb: inspect, validate and convert language metadata datasets
//!
//! A thin front-end over the `langdb` library. Every subcommand loads the
//! catalog from `--data`, `LANGDB_DATA` or the bundled dataset and prints
//! the answer of one catalog query.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use langdb::config::DataSource;
use langdb::integrity::{self, Severity};
use langdb::{Dataset, LanguageCatalog};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "langdb")]
#[command(version)]
#[command(about = "Language metadata catalog: scripts, regions, autonyms and redirects")]
#[command(long_about = None)]
struct Cli {
    /// Dataset file (YAML or JSON); defaults to $LANGDB_DATA, then the bundled data
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show everything known about one language code
    Lookup {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// List languages written in any of the given scripts
    Script {
        #[arg(value_name = "SCRIPT", required = true)]
        scripts: Vec<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List languages spoken in any of the given regions
    Region {
        #[arg(value_name = "REGION", required = true)]
        regions: Vec<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List languages of a region group
    Group {
        #[arg(value_name = "NUMBER")]
        group: u32,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List languages recorded for a territory
    Territory {
        #[arg(value_name = "TERRITORY")]
        territory: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List every canonical language with its autonym
    Autonyms {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Print the region group / region / script group / script tree as JSON
    Browse,

    /// Audit the dataset for data-quality defects
    Validate {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a YAML dataset to JSON
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Sort by autonym instead of dataset order
    #[arg(long)]
    sort: bool,

    /// Print JSON instead of one `code<TAB>autonym` line per language
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let source = DataSource::resolve(cli.data);

    match cli.command {
        Commands::Lookup { code } => {
            let catalog = load(&source)?;
            lookup(&catalog, &code)?;
        }

        Commands::Script { scripts, list } => {
            let catalog = load(&source)?;
            let scripts: Vec<&str> = scripts.iter().map(String::as_str).collect();
            print_codes(&catalog, catalog.languages_in_scripts(&scripts), &list)?;
        }

        Commands::Region { regions, list } => {
            let catalog = load(&source)?;
            let regions: Vec<&str> = regions.iter().map(String::as_str).collect();
            print_codes(&catalog, catalog.languages_in_regions(&regions), &list)?;
        }

        Commands::Group { group, list } => {
            let catalog = load(&source)?;
            print_codes(&catalog, catalog.languages_in_region_group(group), &list)?;
        }

        Commands::Territory { territory, list } => {
            let catalog = load(&source)?;
            let Some(codes) = catalog.languages_in_territory(&territory) else {
                bail!("no languages recorded for territory {territory}");
            };
            let codes = codes.iter().map(String::as_str).collect();
            print_codes(&catalog, codes, &list)?;
        }

        Commands::Autonyms { list } => {
            let catalog = load(&source)?;
            let codes = catalog.autonyms().keys().copied().collect();
            print_codes(&catalog, codes, &list)?;
        }

        Commands::Browse => {
            let catalog = load(&source)?;
            let tree = catalog.all_languages_by_region_and_script();
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }

        Commands::Validate { json } => {
            let dataset = source
                .load_dataset()
                .with_context(|| format!("loading {source}"))?;
            let report = integrity::audit(&dataset);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Validating {source}");
                println!(
                    "  {} languages, {} redirects\n",
                    report.languages, report.redirects
                );
                for finding in &report.findings {
                    let label = match finding.severity() {
                        Severity::Error => "error".red().bold(),
                        Severity::Warning => "warn".yellow().bold(),
                    };
                    println!("  [{label}] {finding}");
                }
                if report.is_clean() {
                    println!("  [{}] no defects found", "ok".green().bold());
                }
            }

            if report.has_errors() {
                bail!("dataset has {} error(s)", report.errors().count());
            }
        }

        Commands::Convert { input, output } => {
            let dataset = Dataset::from_path(&input)
                .with_context(|| format!("reading dataset {}", input.display()))?;
            let report = integrity::audit(&dataset);
            for finding in &report.findings {
                tracing::warn!(%finding, "dataset defect");
            }
            let json = dataset.to_json_string()?;

            if let Some(output_path) = output {
                std::fs::write(&output_path, json)
                    .with_context(|| format!("writing {}", output_path.display()))?;
                eprintln!("Dataset written to: {}", output_path.display());
            } else {
                println!("{json}");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(source: &DataSource) -> Result<LanguageCatalog> {
    source
        .load()
        .with_context(|| format!("loading language catalog from {source}"))
}

fn lookup(catalog: &LanguageCatalog, code: &str) -> Result<()> {
    let Ok(script) = catalog.script(code) else {
        bail!("unknown language code: {code}");
    };

    println!("{}", code.bold());
    if let Some(target) = catalog.is_redirect(code) {
        println!("  Redirects to: {target}");
    }
    println!("  Autonym:      {}", catalog.autonym(code));
    println!("  Script:       {script}");
    println!("  Script group: {}", catalog.group_of_script(script));
    println!("  Regions:      {}", catalog.regions(code));
    println!("  Direction:    {}", catalog.dir(code));
    Ok(())
}

fn print_codes(catalog: &LanguageCatalog, mut codes: Vec<&str>, list: &ListArgs) -> Result<()> {
    if list.sort {
        catalog.sort_codes_by_autonym(&mut codes);
    }

    if list.json {
        let entries: Vec<_> = codes
            .iter()
            .map(|code| serde_json::json!({ "code": code, "autonym": catalog.autonym(code) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for code in &codes {
            println!("{code}\t{}", catalog.autonym(code));
        }
    }
    Ok(())
}
