//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_timeline_adapter::CsvTimelineAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::ini_graph_adapter::{IniGraphAdapter, STRATEGY_SECTION};
use crate::domain::alignment::{last_available_index, last_available_index_of};
use crate::domain::clock::{clock_line, resolve_clock};
use crate::domain::error::PlotGroupError;
use crate::domain::graph::ObjectGraph;
use crate::domain::hierarchy::{build_groups, PlotGroups};
use crate::domain::naming::{filter_by_dataname, get_datanames, get_source_id};
use crate::domain::node::NodeId;
use crate::ports::config_port::ConfigPort;
use crate::ports::graph_port::GraphPort;

const PLOT_SECTION: &str = "plot";

#[derive(Parser, Debug)]
#[command(name = "plotgroup", about = "Plot grouping for strategy object graphs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print plot groups
    Groups {
        #[arg(short, long)]
        graph: PathBuf,
        /// Include feeds and indicators with plotting disabled
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        all: Option<bool>,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        by_plotmaster: Option<bool>,
        /// Only show objects belonging to this feed
        #[arg(long)]
        data: Option<String>,
        /// Append source ids
        #[arg(long)]
        ids: bool,
    },
    /// List data feed names
    Datanames {
        #[arg(short, long)]
        graph: PathBuf,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        all: Option<bool>,
    },
    /// Show the last bar index with a defined timestamp
    LastIndex {
        #[arg(short, long)]
        graph: PathBuf,
        #[arg(long)]
        data: Option<String>,
    },
    /// Show the clock a node is driven by
    Clock {
        #[arg(short, long)]
        graph: PathBuf,
        /// Node label, or `strategy`
        #[arg(long)]
        node: String,
        #[arg(long)]
        to_data: bool,
        /// Also print the clock's bar count and last available index
        #[arg(long)]
        timeline: bool,
    },
}

/// Effective grouping options: `[plot]` defaults, overridden by CLI flags.
/// A flag given as `--all false` turns off a default of `true`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotOptions {
    pub include_non_plotable: bool,
    pub order_by_plotmaster: bool,
    pub dataname: Option<String>,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Groups {
            graph,
            all,
            by_plotmaster,
            data,
            ids,
        } => run_groups(&graph, all, by_plotmaster, data, ids),
        Command::Datanames { graph, all } => run_datanames(&graph, all),
        Command::LastIndex { graph, data } => run_last_index(&graph, data.as_deref()),
        Command::Clock {
            graph,
            node,
            to_data,
            timeline,
        } => run_clock(&graph, &node, to_data, timeline),
    };
    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PlotGroupError> {
    FileConfigAdapter::from_file(path).map_err(|e| PlotGroupError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn load_graph(config: &FileConfigAdapter) -> Result<ObjectGraph, PlotGroupError> {
    let timelines = CsvTimelineAdapter::new(config.base_dir().to_path_buf());
    IniGraphAdapter::new(config, &timelines).load_graph()
}

pub fn plot_options(
    config: &dyn ConfigPort,
    all: Option<bool>,
    by_plotmaster: Option<bool>,
    data: Option<String>,
) -> Result<PlotOptions, PlotGroupError> {
    Ok(PlotOptions {
        include_non_plotable: match all {
            Some(flag) => flag,
            None => config.get_bool(PLOT_SECTION, "include_non_plotable", false)?,
        },
        order_by_plotmaster: match by_plotmaster {
            Some(flag) => flag,
            None => config.get_bool(PLOT_SECTION, "order_by_plotmaster", false)?,
        },
        dataname: data.or_else(|| config.get_string(PLOT_SECTION, "dataname")),
    })
}

/// Node by label. `strategy` names the strategy whatever its label.
pub fn find_node(graph: &ObjectGraph, name: &str) -> Result<NodeId, PlotGroupError> {
    if name.trim().eq_ignore_ascii_case(STRATEGY_SECTION) {
        return Ok(graph.strategy());
    }
    graph
        .find_by_label(name)
        .or_else(|| graph.find_by_label(&name.to_lowercase()))
        .ok_or_else(|| PlotGroupError::ConfigInvalid {
            section: name.to_string(),
            key: "node".to_string(),
            reason: "no such node".to_string(),
        })
}

/// One line per group key, members indented below it. Keys and members outside
/// `dataname` are left out.
pub fn format_groups(
    graph: &ObjectGraph,
    groups: &PlotGroups,
    dataname: Option<&str>,
    ids: bool,
) -> Result<String, PlotGroupError> {
    let describe = |id: NodeId| -> Result<String, PlotGroupError> {
        let label = graph.label(id)?;
        Ok(if ids {
            format!("{label} ({})", get_source_id(graph, id))
        } else {
            label.to_string()
        })
    };

    let mut out = String::new();
    for (key, members) in groups.iter() {
        if !filter_by_dataname(graph, key, dataname)? {
            continue;
        }
        let _ = writeln!(out, "{}", describe(key)?);
        for &member in members {
            if filter_by_dataname(graph, member, dataname)? {
                let _ = writeln!(out, "  {}", describe(member)?);
            }
        }
    }
    Ok(out)
}

fn run_groups(
    path: &Path,
    all: Option<bool>,
    by_plotmaster: Option<bool>,
    data: Option<String>,
    ids: bool,
) -> Result<String, PlotGroupError> {
    let config = load_config(path)?;
    let graph = load_graph(&config)?;
    let options = plot_options(&config, all, by_plotmaster, data)?;
    let groups = build_groups(
        &graph,
        options.include_non_plotable,
        options.order_by_plotmaster,
    )?;
    format_groups(&graph, &groups, options.dataname.as_deref(), ids)
}

fn run_datanames(path: &Path, all: Option<bool>) -> Result<String, PlotGroupError> {
    let config = load_config(path)?;
    let graph = load_graph(&config)?;
    let include_all = plot_options(&config, all, None, None)?.include_non_plotable;
    let mut out = String::new();
    for name in get_datanames(&graph, !include_all)? {
        let _ = writeln!(out, "{name}");
    }
    Ok(out)
}

fn run_last_index(path: &Path, data: Option<&str>) -> Result<String, PlotGroupError> {
    let config = load_config(path)?;
    let graph = load_graph(&config)?;
    Ok(format!("{}\n", last_available_index(&graph, data)?))
}

fn run_clock(
    path: &Path,
    node: &str,
    to_data: bool,
    timeline: bool,
) -> Result<String, PlotGroupError> {
    let config = load_config(path)?;
    let graph = load_graph(&config)?;
    let id = find_node(&graph, node)?;
    let clock = resolve_clock(&graph, id, to_data)?;
    let mut out = format!("{}\n", graph.label(clock)?);
    if timeline {
        let line = clock_line(&graph, id)?;
        let _ = writeln!(
            out,
            "{} bars, last available {}",
            line.len(),
            last_available_index_of(line)
        );
    }
    Ok(out)
}
