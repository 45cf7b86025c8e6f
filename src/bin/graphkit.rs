//! CLI entry point for the `graphkit` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use graphkit::cli::commands::{self, Walk};
use graphkit::GraphError;

#[derive(Parser)]
#[command(
    name = "graphkit",
    about = "graphkit CLI: inspect and query weighted directed graphs from JSON fixtures"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the graphs in a fixture file
    List {
        /// Path to the JSON fixture file
        file: PathBuf,
    },
    /// Print every edge of a graph
    Show {
        /// Path to the JSON fixture file
        file: PathBuf,
        /// Graph name inside the fixture file
        #[arg(long)]
        graph: String,
    },
    /// Breadth-first traversal from a node
    Bfs {
        /// Path to the JSON fixture file
        file: PathBuf,
        /// Graph name inside the fixture file
        #[arg(long)]
        graph: String,
        /// Starting node ID
        start: String,
    },
    /// Depth-first traversal from a node
    Dfs {
        /// Path to the JSON fixture file
        file: PathBuf,
        /// Graph name inside the fixture file
        #[arg(long)]
        graph: String,
        /// Starting node ID
        start: String,
    },
    /// Shortest distances from a node (Dijkstra)
    Dijkstra {
        /// Path to the JSON fixture file
        file: PathBuf,
        /// Graph name inside the fixture file
        #[arg(long)]
        graph: String,
        /// Starting node ID
        start: String,
        /// Print only the route to this node
        #[arg(long)]
        to: Option<String>,
    },
    /// Re-emit one graph as a fixture document
    Export {
        /// Path to the JSON fixture file
        file: PathBuf,
        /// Graph name inside the fixture file
        #[arg(long)]
        graph: String,
        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = match cli.format.as_str() {
        "json" => true,
        "text" => false,
        other => {
            eprintln!("Invalid format: {}", other);
            process::exit(3);
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::List { file } => commands::cmd_list(&file, json),
        Commands::Show { file, graph } => commands::cmd_show(&file, &graph, json),
        Commands::Bfs { file, graph, start } => {
            commands::cmd_walk(&file, &graph, &start, Walk::Breadth, json)
        }
        Commands::Dfs { file, graph, start } => {
            commands::cmd_walk(&file, &graph, &start, Walk::Depth, json)
        }
        Commands::Dijkstra {
            file,
            graph,
            start,
            to,
        } => commands::cmd_dijkstra(&file, &graph, &start, to.as_deref(), json),
        Commands::Export {
            file,
            graph,
            pretty,
        } => commands::cmd_export(&file, &graph, pretty),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            GraphError::Io(_) => 1,
            GraphError::Json(_) => 2,
            GraphError::NodeNotFound(_)
            | GraphError::EdgeNotFound { .. }
            | GraphError::GraphNotFound(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
