use std::fmt::Display;
use std::path::PathBuf;

use aintar_cli::commands;
use aintar_config::LoggingConfig;
use aintar_observability::init_logging;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "aintar-cli")]
#[command(about = "AINTAR CLI - Inspect permission and workflow rules", long_about = None)]
struct Cli {
    /// Workflow metadata snapshot (defaults to WORKFLOW_METADATA_PATH)
    #[arg(short = 'm', long, global = true, env = "WORKFLOW_METADATA_PATH")]
    metadata: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Close a permission set under its dependencies
    Resolve {
        /// Granted permission ids
        #[arg(required = true)]
        permissions: Vec<u32>,
    },
    /// List held permissions that depend on one permission
    Dependents {
        /// Permission that would be revoked
        permission: u32,

        /// Currently held permission ids
        held: Vec<u32>,
    },
    /// Show the navigation modules a permission set can open
    Modules {
        /// Granted permission ids
        permissions: Vec<u32>,
    },
    /// Map a pathname to its navigation module
    Detect {
        path: String,
    },
    /// Validate moving a document to another step
    Validate {
        /// JSON file with the document
        #[arg(short = 'd', long)]
        document: PathBuf,

        /// Source step (defaults to the document's current step)
        #[arg(long)]
        from: Option<i32>,

        /// Destination step
        #[arg(long)]
        to: i32,

        /// User who will receive the document
        #[arg(short = 'u', long)]
        user: i64,

        /// Acting user, taken as the owner when the document has none
        #[arg(long)]
        actor: Option<i64>,
    },
    /// List the steps a document type can move to from a step
    Transitions {
        #[arg(long)]
        doctype: i32,

        #[arg(long)]
        from: i32,
    },
    /// Sanity-check the metadata snapshot
    Check,
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let _log_guard = match init_logging(&LoggingConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => fail("initializing logging", e),
    };

    let metadata_path = cli.metadata.as_deref();
    let json = cli.json;

    let metadata = || match commands::load_metadata(metadata_path) {
        Ok(metadata) => metadata,
        Err(e) => fail("loading metadata", e),
    };
    let graph = || match metadata().dependency_graph() {
        Ok(graph) => graph,
        Err(e) => fail("building the dependency graph", e),
    };

    match cli.command {
        Commands::Resolve { permissions } => print(json, &commands::resolve(&graph(), &permissions)),
        Commands::Dependents { permission, held } => {
            print(json, &commands::dependents(&graph(), permission, &held))
        }
        Commands::Modules { permissions } => print(json, &commands::modules(&graph(), &permissions)),
        Commands::Detect { path } => print(json, &commands::detect(&path)),
        Commands::Validate {
            document,
            from,
            to,
            user,
            actor,
        } => match commands::validate(&metadata(), &document, from, to, user, actor) {
            Ok(report) => {
                print(json, &report);
                if !report.can_proceed() {
                    std::process::exit(2);
                }
            }
            Err(e) => fail("validating transition", e),
        },
        Commands::Transitions { doctype, from } => {
            print(json, &commands::transitions(&metadata(), doctype, from))
        }
        Commands::Check => {
            let Some(path) = metadata_path else {
                eprintln!("❌ No metadata file given. Use --metadata or WORKFLOW_METADATA_PATH.");
                std::process::exit(1);
            };
            match commands::check(path) {
                Ok(report) => {
                    print(json, &report);
                    if !report.is_sound() {
                        std::process::exit(2);
                    }
                }
                Err(e) => fail("checking metadata", e),
            }
        }
    }
}

fn print<T: Display + Serialize>(json: bool, report: &T) {
    if !json {
        print!("{}", report);
        return;
    }
    match serde_json::to_string_pretty(report) {
        Ok(output) => println!("{}", output),
        Err(e) => fail("serializing output", e),
    }
}

fn fail(action: &str, error: impl Display) -> ! {
    eprintln!("\n❌ Error {}: {:#}", action, error);
    std::process::exit(1);
}
