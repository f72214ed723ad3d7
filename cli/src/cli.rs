use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "flowpath",
    about = "Shortest paths, minimum spanning trees and maximum flow over a graph read from text",
    version
)]
pub struct Cli {
    /// Read the graph from this file instead of standard input
    #[arg(long, short, global = true)]
    pub input: Option<PathBuf>,

    /// Print the full result and statistics as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dijkstra distance between two vertices of a directed graph
    ShortestPath {
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true)]
        end: i64,
        /// Also print the vertices along the path
        #[arg(long)]
        path: bool,
    },
    /// Prim minimum spanning tree weight of an undirected graph
    Mst {
        /// Vertex to grow the tree from (vertex 0 when omitted)
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,
    },
    /// Edmonds-Karp maximum flow between two vertices
    MaxFlow {
        #[arg(allow_negative_numbers = true)]
        source: i64,
        #[arg(allow_negative_numbers = true)]
        sink: i64,
    },
}

impl Cli {
    /// Log filter implied by the verbosity flag
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands_and_globals() {
        let cli = Cli::parse_from(["flowpath", "-vv", "max-flow", "0", "3", "--json"]);
        assert!(cli.json);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
        assert!(matches!(cli.command, Command::MaxFlow { source: 0, sink: 3 }));
    }

    #[test]
    fn negative_vertices_reach_validation() {
        let cli = Cli::parse_from(["flowpath", "shortest-path", "-1", "2"]);
        assert!(matches!(cli.command, Command::ShortestPath { start: -1, end: 2, path: false }));
    }

    #[test]
    fn mst_start_is_optional() {
        let cli = Cli::parse_from(["flowpath", "mst", "--input", "graph.txt"]);
        assert_eq!(cli.input, Some(PathBuf::from("graph.txt")));
        assert!(matches!(cli.command, Command::Mst { start: None }));

        let cli = Cli::parse_from(["flowpath", "mst", "--start", "2"]);
        assert!(matches!(cli.command, Command::Mst { start: Some(2) }));
    }
}
