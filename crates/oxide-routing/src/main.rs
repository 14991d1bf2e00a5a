//! oxide-routing CLI
//!
//! Command-line tool for checking how a route table resolves requests.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_routing::{Method, RouteRegistry, RouteTable};

/// Inspect route matching for a JSON route table.
#[derive(Parser)]
#[command(name = "oxide-routing")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route table file.
    #[arg(short, long, env = "OXIDE_ROUTES", default_value = "routes.json")]
    routes: PathBuf,

    /// Treat trailing slashes as significant, whatever the table says.
    #[arg(long)]
    strict_trailing_slashes: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the routes a request would hit, in priority order.
    Match {
        /// Request method (GET, POST, ..., BEFORE, AFTER).
        method: Method,

        /// Request path.
        path: String,
    },

    /// Show the template a handler is registered under.
    Which {
        /// Handler label.
        handler: String,
    },

    /// List every route in the table.
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let registry = load(&cli)?;
    info!(
        routes = registry.len(),
        ignore_trailing_slashes = registry.config().ignore_trailing_slashes,
        "Route table loaded"
    );

    match cli.command {
        Commands::Match { method, path } => {
            let candidates = registry.find_candidates(method, &path);
            debug!(%method, %path, count = candidates.len(), "Matched");

            let out: Vec<_> = candidates
                .into_iter()
                .map(|entry| {
                    json!({
                        "method": entry.method().as_str(),
                        "path": entry.template(),
                        "handler": entry.handler(),
                        "params": registry.extract_params(entry, &path),
                        "splats": registry.extract_splats(entry, &path),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Which { handler } => {
            match registry.find_template(|entry| *entry.handler() == handler) {
                Some(template) => println!("{template}"),
                None => anyhow::bail!("no route registered for handler '{handler}'"),
            }
        }

        Commands::List => {
            for entry in registry.iter() {
                println!(
                    "{:<8} {:<40} {}",
                    entry.method(),
                    entry.template(),
                    entry.handler()
                );
            }
        }
    }

    Ok(())
}

fn load(cli: &Cli) -> anyhow::Result<RouteRegistry<String>> {
    let json = std::fs::read_to_string(&cli.routes)
        .with_context(|| format!("reading {}", cli.routes.display()))?;
    let mut table = RouteTable::from_json(&json)
        .with_context(|| format!("parsing {}", cli.routes.display()))?;
    if cli.strict_trailing_slashes {
        table.config.ignore_trailing_slashes = false;
    }
    Ok(table.into_registry())
}
