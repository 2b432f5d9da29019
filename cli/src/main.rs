mod input;

use aqueduct_core::{
    max_flow_with_config, minimum_spanning_tree_with_config, shortest_path_with_config,
    AlgorithmError, SolverConfig,
};
use input::{Example, ParseError};
use log::debug;
use serde::Serialize;
use std::io::{Read, Write};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Parse(ParseError),
    Algorithm(AlgorithmError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Parse(err) => write!(f, "Invalid edge format: {err}"),
            CliError::Algorithm(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ParseError> for CliError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<AlgorithmError> for CliError {
    fn from(value: AlgorithmError) -> Self {
        Self::Algorithm(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    MaxFlow,
    Mst,
    ShortestPath,
}

impl Command {
    fn as_str(self) -> &'static str {
        match self {
            Command::MaxFlow => "max-flow",
            Command::Mst => "mst",
            Command::ShortestPath => "shortest-path",
        }
    }

    fn example(self) -> Example {
        match self {
            Command::MaxFlow => input::FLOW_EXAMPLE,
            Command::Mst => input::TREE_EXAMPLE,
            Command::ShortestPath => input::PATH_EXAMPLE,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    nodes: Option<String>,
    edges: Option<String>,
    source: Option<String>,
    target: Option<String>,
    config: Option<String>,
    example: bool,
    pretty: bool,
}

#[derive(Serialize)]
struct Report<'a, R, S> {
    algorithm: &'static str,
    result: &'a R,
    summary: S,
}

#[derive(Serialize)]
struct FlowSummary {
    total_capacity: f64,
    utilization: Option<f64>,
    active_edges: usize,
}

#[derive(Serialize)]
struct TreeSummary {
    edge_count: usize,
    spanning: bool,
}

#[derive(Serialize)]
struct PathSummary {
    path_exists: bool,
    hops: usize,
}

fn usage() -> &'static str {
    "aqueduct\n\
\n\
USAGE:\n\
  aqueduct max-flow [--nodes <A,B,C>] [--edges <path>|-] [--source <node>] [--target <node>] [--config <path>] [--example] [--pretty]\n\
  aqueduct mst [--nodes <A,B,C>] [--edges <path>|-] [--config <path>] [--example] [--pretty]\n\
  aqueduct shortest-path [--nodes <A,B,C>] [--edges <path>|-] [--source <node>] [--target <node>] [--config <path>] [--example] [--pretty]\n\
\n\
NOTES:\n\
  - Edges are one per line as `source target value`; blank lines are skipped.\n\
  - If --edges is omitted or '-', edges are read from stdin.\n\
  - --source defaults to the first node and --target (or --sink) to the last one.\n\
  - --example loads the built-in data set; --nodes and --edges still override it.\n\
  - --config reads a JSON solver configuration.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "max-flow" | "mst" | "shortest-path" if args.command.is_some() => {
                return Err(CliError::Usage(usage()))
            }
            "max-flow" => args.command = Some(Command::MaxFlow),
            "mst" => args.command = Some(Command::Mst),
            "shortest-path" => args.command = Some(Command::ShortestPath),
            "--pretty" => args.pretty = true,
            "--example" => args.example = true,
            "--nodes" | "--edges" | "--source" | "--sink" | "--target" | "--config" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let slot = match a.as_str() {
                    "--nodes" => &mut args.nodes,
                    "--edges" => &mut args.edges,
                    "--source" => &mut args.source,
                    "--config" => &mut args.config,
                    _ => &mut args.target,
                };
                *slot = Some(value.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.command.is_none() {
        return Err(CliError::Usage(usage()));
    }
    if args.nodes.is_none() && !args.example {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_config(path: Option<&str>) -> Result<SolverConfig, CliError> {
    match path {
        None => Ok(SolverConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(command) = args.command else {
        return Err(CliError::Usage(usage()));
    };
    let example = command.example();

    let nodes = match args.nodes.as_deref() {
        Some(list) => input::parse_nodes(list),
        None => input::parse_nodes(example.nodes),
    };
    let edges = match (args.edges.as_deref(), args.example) {
        (None, true) => input::parse_edges(example.edges)?,
        (path, _) => input::parse_edges(&read_input(path)?)?,
    };
    let config = read_config(args.config.as_deref())?;
    debug!(
        "{}: {} node(s), {} edge(s)",
        command.as_str(),
        nodes.len(),
        edges.len()
    );

    // Form defaults: first node as source, last node as sink or target
    let source = args
        .source
        .or_else(|| nodes.first().cloned())
        .unwrap_or_default();
    let target = args
        .target
        .or_else(|| (nodes.len() > 1).then(|| nodes[nodes.len() - 1].clone()))
        .unwrap_or_default();

    match command {
        Command::MaxFlow => {
            let result = max_flow_with_config(&nodes, &edges, &source, &target, &config)?;
            let summary = FlowSummary {
                total_capacity: result.total_capacity(),
                utilization: result.utilization(),
                active_edges: result.active_edges().count(),
            };
            write_json(
                &Report {
                    algorithm: command.as_str(),
                    result: &result,
                    summary,
                },
                args.pretty,
            )
        }
        Command::Mst => {
            let result = minimum_spanning_tree_with_config(&nodes, &edges, &config)?;
            let summary = TreeSummary {
                edge_count: result.mst_edges.len(),
                spanning: result.is_spanning(),
            };
            write_json(
                &Report {
                    algorithm: command.as_str(),
                    result: &result,
                    summary,
                },
                args.pretty,
            )
        }
        Command::ShortestPath => {
            let result = shortest_path_with_config(&nodes, &edges, &source, &target, &config)?;
            let summary = PathSummary {
                path_exists: result.path_exists(),
                hops: result.segments().len(),
            };
            write_json(
                &Report {
                    algorithm: command.as_str(),
                    result: &result,
                    summary,
                },
                args.pretty,
            )
        }
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
