#![allow(dead_code)]

use plotgroup::domain::graph::ObjectGraph;
pub use plotgroup::domain::node::{DataFeed, Derived, NodeId, NodeKind, PlotInfo};
use std::io::Write;
use std::path::Path;

pub fn feed(name: &str, plot: bool) -> DataFeed {
    DataFeed {
        name: Some(name.to_string()),
        dataname: Some(format!("{}.csv", name.to_lowercase())),
        plotinfo: PlotInfo {
            plot,
            ..PlotInfo::default()
        },
        datetime: Vec::new(),
    }
}

pub fn indicator(clock: NodeId) -> NodeKind {
    NodeKind::Indicator(Derived::new(clock))
}

pub fn subplot_indicator(clock: NodeId) -> NodeKind {
    NodeKind::Indicator(Derived::new(clock).with_subplot(true))
}

/// Strategy with feeds `A` (plotted) and `B` (not plotted) and indicator `I` on `A`.
pub struct TwoFeeds {
    pub graph: ObjectGraph,
    pub a: NodeId,
    pub b: NodeId,
    pub i: NodeId,
}

pub fn two_feeds() -> TwoFeeds {
    let mut graph = ObjectGraph::new("strategy");
    let a = graph.add_data("a", feed("A", true));
    let b = graph.add_data("b", feed("B", false));
    let i = graph.add_indicator("i", indicator(a));
    TwoFeeds { graph, a, b, i }
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
}
