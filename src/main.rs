use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use kinship::config::{get_config_path, load_config, save_config, ReferencePolicy, ResolverConfig};
use kinship::format::{format_relations_as_json, format_relations_as_markdown};
use kinship::input::load_members;
use kinship::types::{PersonId, PersonRecord};
use kinship::RelationResolver;

/// Kinship labels for family trees.
#[derive(Parser)]
#[command(name = "kinship", about = "Compute kinship labels for a family tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default resolver config
    Init {
        /// Directory to hold `.kinship/` (default: current directory)
        path: Option<String>,
    },
    /// Label every member of a family file relative to the reference person
    Resolve {
        /// JSON file with an array (or id-keyed object) of members
        file: PathBuf,
        /// Resolve relative to this member id instead of the isSelf flag
        #[arg(long = "as", value_name = "ID")]
        reference: Option<String>,
        /// Output format (json or markdown)
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Directory holding `.kinship/config.json` (default: current directory)
        #[arg(short, long)]
        root: Option<String>,
        /// Take the first isSelf member instead of rejecting duplicates
        #[arg(long)]
        first_wins: bool,
        /// Derive missing generations from parent/child/spouse links
        #[arg(long)]
        infer_generations: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> kinship::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let root = resolve_path(path);
            save_config(&root, &ResolverConfig::default())?;
            println!("Wrote {}", get_config_path(&root).display());
        }
        Commands::Resolve {
            file,
            reference,
            format,
            root,
            first_wins,
            infer_generations,
        } => {
            let mut config = load_config(&resolve_path(root))?;
            if first_wins {
                config.reference_policy = ReferencePolicy::FirstWins;
            }
            config.infer_generations |= infer_generations;

            let members = load_members(&file)?;
            let resolver = RelationResolver::with_config(&config);
            let results = match reference {
                Some(id) => resolver.resolve_for(&members, &parse_reference(&members, &id))?,
                None => resolver.resolve(&members)?,
            };

            if format == "markdown" {
                println!("{}", format_relations_as_markdown(&results));
            } else {
                println!("{}", format_relations_as_json(&results));
            }
        }
    }
    Ok(())
}

/// Matches a command-line id against the members' ids, whether they were
/// recorded as numbers or strings.
fn parse_reference(members: &[PersonRecord], raw: &str) -> PersonId {
    members
        .iter()
        .map(|m| &m.id)
        .find(|id| id.to_string() == raw)
        .cloned()
        .unwrap_or_else(|| PersonId::from(raw))
}

/// Resolves an optional path argument, defaulting to the current directory.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
