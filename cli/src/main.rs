//! `flowpath` command-line driver
//!
//! Reads a graph description from a file or standard input, validates it
//! and runs one engine over it.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

mod cli;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flowpath_core::{
    Algorithm, AlgorithmError, DijkstraStatistics, GraphInput, InputError, MaxFlowEngine,
    MinimumSpanningTreeEngine, NodeId, ShortestPathEngine, Weight,
};
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::cli::{Cli, Command};

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Serialize)]
struct ShortestPathReport<'a> {
    source: NodeId,
    target: NodeId,
    distance: Option<Weight>,
    path: Vec<NodeId>,
    statistics: &'a DijkstraStatistics,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(cli: &Cli) -> Result<GraphInput, CliError> {
    match &cli.input {
        Some(path) => {
            info!("reading graph from {}", path.display());
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?;
            Ok(GraphInput::read_from(file)?)
        }
        None => {
            info!("reading graph from standard input");
            Ok(GraphInput::read_from(io::stdin().lock())?)
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = read_input(cli)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::ShortestPath { start, end, path } => {
            let start = input.validate_vertex(start)?;
            let end = input.validate_vertex(end)?;

            let graph = input.to_directed_graph();
            let mut engine = ShortestPathEngine::new(&graph, start)?;
            engine.compute();
            let distance = engine.shortest_distance(end);
            debug!("{}: {:?}", engine.name(), engine.statistics());

            if cli.json {
                let report = ShortestPathReport {
                    source: start,
                    target: end,
                    distance,
                    path: engine.path(end),
                    statistics: engine.statistics(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                return Ok(());
            }

            match distance {
                Some(distance) => writeln!(out, "{distance}")?,
                None => writeln!(out, "not connected")?,
            }
            if path && distance.is_some() {
                let hops: Vec<String> = engine.path(end).iter().map(ToString::to_string).collect();
                writeln!(out, "{}", hops.join(" "))?;
            }
        }

        Command::Mst { start } => {
            let graph = input.to_undirected_graph();
            let mut engine = MinimumSpanningTreeEngine::new(&graph);
            if let Some(start) = start {
                let start = input.validate_vertex(start)?;
                engine.set_parameter("start_vertex", &start.to_string())?;
            }
            let result = engine.compute_mst()?;
            debug!("{}: {:?}", engine.name(), engine.statistics());

            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
                return Ok(());
            }

            match result {
                Some(tree) => writeln!(out, "{}", tree.total_weight)?,
                None => writeln!(out, "not connected")?,
            }
        }

        Command::MaxFlow { source, sink } => {
            let source = input.validate_vertex(source)?;
            let sink = input.validate_vertex(sink)?;

            let mut engine = MaxFlowEngine::new(input.to_flow_network());
            let result = engine.solve(source, sink)?;
            debug!("{}: {:?}", engine.name(), result.statistics);

            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            } else {
                writeln!(out, "Max flow {}", result.max_flow)?;
            }
        }
    }

    Ok(())
}
