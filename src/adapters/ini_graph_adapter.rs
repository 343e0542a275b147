//! Builds an [`ObjectGraph`] from an INI graph description.
//!
//! Every node is a section whose name is used as the node label and as the
//! reference other sections point at. The `[strategy]` section lists the feeds,
//! indicators and observers in declaration order; lines, line operations and
//! stubs are pulled in through references only.

use crate::domain::error::PlotGroupError;
use crate::domain::graph::ObjectGraph;
use crate::domain::node::{DataFeed, Derived, NodeId, NodeKind, PlotInfo};
use crate::ports::config_port::ConfigPort;
use crate::ports::graph_port::GraphPort;
use crate::ports::timeline_port::TimelinePort;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use tracing::debug;

pub const STRATEGY_SECTION: &str = "strategy";

pub struct IniGraphAdapter<'a> {
    config: &'a dyn ConfigPort,
    timelines: &'a dyn TimelinePort,
}

impl<'a> IniGraphAdapter<'a> {
    pub fn new(config: &'a dyn ConfigPort, timelines: &'a dyn TimelinePort) -> Self {
        Self { config, timelines }
    }
}

impl GraphPort for IniGraphAdapter<'_> {
    fn load_graph(&self) -> Result<ObjectGraph, PlotGroupError> {
        if !self.config.has_section(STRATEGY_SECTION) {
            return Err(PlotGroupError::ConfigMissing {
                section: STRATEGY_SECTION.into(),
                key: "datas".into(),
            });
        }
        let label = self
            .config
            .get_string(STRATEGY_SECTION, "label")
            .unwrap_or_else(|| "Strategy".to_string());

        let mut loader = Loader {
            config: self.config,
            timelines: self.timelines,
            graph: ObjectGraph::new(label),
            ids: HashMap::new(),
            pending: VecDeque::new(),
        };
        let strategy = loader.graph.strategy();
        loader.ids.insert(STRATEGY_SECTION.to_string(), strategy);

        if let Some(timeline) = self.config.get_string(STRATEGY_SECTION, "timeline") {
            let datetime = self.timelines.fetch_timeline(Path::new(&timeline))?;
            loader.graph.set_strategy_timeline(datetime);
        }

        let datas = loader.intern_list("datas")?;
        let indicators = loader.intern_list("indicators")?;
        let observers = loader.intern_list("observers")?;

        while let Some((section, id)) = loader.pending.pop_front() {
            let kind = loader.build_kind(&section)?;
            debug!(section = %section, kind = kind.name(), "loaded node");
            loader.graph.define(id, kind)?;
        }

        let mut graph = loader.graph;
        for id in datas {
            graph.register_data(id)?;
        }
        for id in indicators {
            graph.register_indicator(id)?;
        }
        for id in observers {
            graph.register_observer(id)?;
        }
        Ok(graph)
    }
}

struct Loader<'a> {
    config: &'a dyn ConfigPort,
    timelines: &'a dyn TimelinePort,
    graph: ObjectGraph,
    ids: HashMap<String, NodeId>,
    pending: VecDeque<(String, NodeId)>,
}

impl Loader<'_> {
    fn intern(&mut self, from: &str, key: &str, reference: &str) -> Result<NodeId, PlotGroupError> {
        let section = reference.trim().to_lowercase();
        if let Some(&id) = self.ids.get(&section) {
            return Ok(id);
        }
        if !self.config.has_section(&section) {
            return Err(PlotGroupError::ConfigInvalid {
                section: from.to_string(),
                key: key.to_string(),
                reason: format!("no section [{}]", section),
            });
        }
        let id = self.graph.reserve(section.clone());
        self.ids.insert(section.clone(), id);
        self.pending.push_back((section, id));
        Ok(id)
    }

    fn intern_list(&mut self, key: &str) -> Result<Vec<NodeId>, PlotGroupError> {
        self.config
            .get_list(STRATEGY_SECTION, key)
            .iter()
            .map(|reference| self.intern(STRATEGY_SECTION, key, reference))
            .collect()
    }

    fn required_ref(&mut self, section: &str, key: &str) -> Result<NodeId, PlotGroupError> {
        let reference =
            self.config
                .get_string(section, key)
                .ok_or_else(|| PlotGroupError::ConfigMissing {
                    section: section.to_string(),
                    key: key.to_string(),
                })?;
        self.intern(section, key, &reference)
    }

    fn plotinfo(&mut self, section: &str) -> Result<PlotInfo, PlotGroupError> {
        let plotmaster = match self.config.get_string(section, "plotmaster") {
            Some(reference) if !reference.trim().is_empty() => {
                Some(self.intern(section, "plotmaster", &reference)?)
            }
            _ => None,
        };
        Ok(PlotInfo {
            plot: self.config.get_bool(section, "plot", true)?,
            plotskip: self.config.get_bool(section, "plotskip", false)?,
            subplot: self.config.get_bool(section, "subplot", false)?,
            plotmaster,
        })
    }

    fn build_kind(&mut self, section: &str) -> Result<NodeKind, PlotGroupError> {
        let kind = self
            .config
            .get_string(section, "kind")
            .ok_or_else(|| PlotGroupError::ConfigMissing {
                section: section.to_string(),
                key: "kind".to_string(),
            })?;

        Ok(match kind.trim().to_lowercase().as_str() {
            "data" => {
                let datetime = match self.config.get_string(section, "timeline") {
                    Some(path) => self.timelines.fetch_timeline(Path::new(&path))?,
                    None => Vec::new(),
                };
                NodeKind::Data(DataFeed {
                    name: self.config.get_string(section, "name"),
                    dataname: self.config.get_string(section, "dataname"),
                    plotinfo: self.plotinfo(section)?,
                    datetime,
                })
            }
            "indicator" => NodeKind::Indicator(self.derived(section)?),
            "observer" => NodeKind::Observer(self.derived(section)?),
            "line" => NodeKind::Line {
                owner: self.required_ref(section, "owner")?,
            },
            "operation" => NodeKind::LinesOperation {
                clock: self.required_ref(section, "clock")?,
            },
            "stub" => {
                let mut lines = Vec::new();
                for reference in self.config.get_list(section, "lines") {
                    lines.push(self.intern(section, "lines", &reference)?);
                }
                NodeKind::LineStub { lines }
            }
            _ => NodeKind::Foreign {
                type_name: kind.trim().to_string(),
            },
        })
    }

    fn derived(&mut self, section: &str) -> Result<Derived, PlotGroupError> {
        Ok(Derived {
            clock: self.required_ref(section, "clock")?,
            plotinfo: self.plotinfo(section)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    struct NoTimelines;

    impl TimelinePort for NoTimelines {
        fn fetch_timeline(&self, source: &Path) -> Result<Vec<f64>, PlotGroupError> {
            Ok(vec![source.as_os_str().len() as f64])
        }
    }

    fn load(content: &str) -> Result<ObjectGraph, PlotGroupError> {
        let config = FileConfigAdapter::from_string(content).unwrap();
        IniGraphAdapter::new(&config, &NoTimelines).load_graph()
    }

    fn id_of(graph: &ObjectGraph, label: &str) -> NodeId {
        graph.find_by_label(label).unwrap()
    }

    const GRAPH: &str = r#"
[strategy]
label = SmaCross
timeline = main.csv
datas = data.btc, data.eth
indicators = ind.sma, ind.cross
observers = obs.cash

[data.btc]
kind = data
name = BTC
timeline = btc.csv

[data.eth]
kind = data
dataname = eth.csv
plot = no
plotmaster = data.btc

[ind.sma]
kind = indicator
clock = data.btc
subplot = false

[line.sma0]
kind = line
owner = ind.sma

[ind.cross]
kind = indicator
clock = op.cross
subplot = true

[op.cross]
kind = operation
clock = stub.sma

[stub.sma]
kind = stub
lines = line.sma0

[obs.cash]
kind = observer
clock = strategy
"#;

    #[test]
    fn loads_lists_in_declaration_order() {
        let g = load(GRAPH).unwrap();
        assert_eq!(g.label(g.strategy()).unwrap(), "SmaCross");
        let labels = |ids: &[NodeId]| -> Vec<String> {
            ids.iter().map(|&id| g.label(id).unwrap().to_string()).collect()
        };
        assert_eq!(labels(g.datas()), vec!["data.btc", "data.eth"]);
        assert_eq!(labels(g.indicators()), vec!["ind.sma", "ind.cross"]);
        assert_eq!(labels(g.observers()), vec!["obs.cash"]);
    }

    #[test]
    fn reads_feed_attributes_and_timelines() {
        let g = load(GRAPH).unwrap();
        let btc = id_of(&g, "data.btc");
        let eth = id_of(&g, "data.eth");
        let NodeKind::Data(feed) = &g.node(btc).unwrap().kind else {
            panic!("expected a feed");
        };
        assert_eq!(feed.name.as_deref(), Some("BTC"));
        assert_eq!(feed.datetime, vec![7.0]);
        let info = g.plotinfo(eth).unwrap().unwrap();
        assert!(!info.plot);
        assert_eq!(info.plotmaster, Some(btc));
        assert_eq!(g.node(g.strategy()).unwrap().datetime(), Some(&[8.0][..]));
    }

    #[test]
    fn resolves_references_to_unlisted_nodes() {
        let g = load(GRAPH).unwrap();
        let op = id_of(&g, "op.cross");
        let stub = id_of(&g, "stub.sma");
        let line = id_of(&g, "line.sma0");
        assert!(matches!(g.node(op).unwrap().kind, NodeKind::LinesOperation { clock } if clock == stub));
        assert!(matches!(&g.node(stub).unwrap().kind, NodeKind::LineStub { lines } if lines == &vec![line]));
    }

    #[test]
    fn strategy_is_referenceable() {
        let g = load(GRAPH).unwrap();
        let cash = id_of(&g, "obs.cash");
        let NodeKind::Observer(d) = &g.node(cash).unwrap().kind else {
            panic!("expected an observer");
        };
        assert_eq!(d.clock, g.strategy());
    }

    #[test]
    fn unknown_kind_becomes_foreign() {
        let g = load(
            "[strategy]\nindicators = x\n[x]\nkind = analyzer\n",
        )
        .unwrap();
        let x = id_of(&g, "x");
        assert_eq!(g.node(x).unwrap().kind.name(), "analyzer");
    }

    #[test]
    fn missing_strategy_section() {
        assert!(matches!(
            load("[data.a]\nkind = data\n"),
            Err(PlotGroupError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn dangling_reference_is_invalid() {
        let err = load("[strategy]\nindicators = i\n[i]\nkind = indicator\nclock = nowhere\n")
            .unwrap_err();
        assert!(matches!(err, PlotGroupError::ConfigInvalid { ref key, .. } if key == "clock"));
    }

    #[test]
    fn missing_kind_and_clock() {
        assert!(matches!(
            load("[strategy]\ndatas = d\n[d]\nname = x\n"),
            Err(PlotGroupError::ConfigMissing { ref key, .. }) if key == "kind"
        ));
        assert!(matches!(
            load("[strategy]\nindicators = i\n[i]\nkind = indicator\n"),
            Err(PlotGroupError::ConfigMissing { ref key, .. }) if key == "clock"
        ));
    }

    #[test]
    fn bad_boolean_is_invalid() {
        assert!(matches!(
            load("[strategy]\ndatas = d\n[d]\nkind = data\nplot = sometimes\n"),
            Err(PlotGroupError::ConfigInvalid { ref key, .. }) if key == "plot"
        ));
    }

    #[test]
    fn non_feed_in_datas_is_rejected() {
        assert!(matches!(
            load("[strategy]\ndatas = i\n[i]\nkind = indicator\nclock = strategy\n"),
            Err(PlotGroupError::UnsupportedNodeKind { .. })
        ));
    }

    #[test]
    fn plotmaster_cycles_load() {
        let g = load(
            "[strategy]\ndatas = a, b\n[a]\nkind = data\nplotmaster = b\n[b]\nkind = data\nplotmaster = a\n",
        )
        .unwrap();
        assert_eq!(g.datas().len(), 2);
    }
}
