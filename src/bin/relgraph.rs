//! CLI entry point for the `relgraph` command-line tool.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use relgraph::cli::commands;
use relgraph::graph::TraversalDirection;
use relgraph::GraphError;

#[derive(Parser)]
#[command(
    name = "relgraph",
    about = "relgraph CLI: traversal and hierarchy queries over edge-list files"
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
    /// Display summary information about an edge-list file
    Info {
        /// Path to the edge-list file
        file: PathBuf,
    },
    /// Breadth-first traversal from a start node
    Bfs {
        /// Path to the edge-list file
        file: PathBuf,
        /// Start node
        start: String,
        /// Direction: forward, backward, or both
        #[arg(long, default_value = "forward")]
        direction: String,
        /// Maximum edge depth
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Nearest common ancestor of two or more nodes
    CommonParent {
        /// Path to the edge-list file
        file: PathBuf,
        /// Query nodes; the first one is the pivot
        #[arg(required = true, num_args = 2..)]
        nodes: Vec<String>,
    },
    /// Connected components, ignoring edge direction
    Components {
        /// Path to the edge-list file
        file: PathBuf,
    },
    /// Nodes without outgoing edges
    Leaves {
        /// Path to the edge-list file
        file: PathBuf,
        /// Report nodes with a single connection instead
        #[arg(long)]
        undirected: bool,
    },
    /// Nodes without incoming edges
    Roots {
        /// Path to the edge-list file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    if cli.verbose || std::env::var_os("RUST_LOG").is_some() {
        let mut builder = env_logger::Builder::from_default_env();
        if cli.verbose {
            builder.filter_level(log::LevelFilter::Debug);
        }
        let _ = builder.try_init();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Info { file } => commands::cmd_info(&file, json, &mut out),
        Commands::Bfs {
            file,
            start,
            direction,
            max_depth,
        } => {
            let dir = match direction.as_str() {
                "forward" => TraversalDirection::Forward,
                "backward" => TraversalDirection::Backward,
                "both" => TraversalDirection::Both,
                other => {
                    eprintln!("Invalid direction: {}", other);
                    process::exit(3);
                }
            };
            commands::cmd_bfs(&file, &start, dir, max_depth, json, &mut out)
        }
        Commands::CommonParent { file, nodes } => {
            commands::cmd_common_parent(&file, &nodes, json, &mut out)
        }
        Commands::Components { file } => commands::cmd_components(&file, json, &mut out),
        Commands::Leaves { file, undirected } => {
            commands::cmd_leaves(&file, undirected, json, &mut out)
        }
        Commands::Roots { file } => commands::cmd_roots(&file, json, &mut out),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            GraphError::Io(_) => 1,
            GraphError::Parse { .. } => 2,
            GraphError::DuplicateEdge(_) | GraphError::DuplicateNode(_) => 4,
            GraphError::EndpointMismatch { .. } => 5,
        };
        process::exit(code);
    }
}
