//! Trimming of ragged timelines when feeds of different resolutions are combined.

use crate::domain::error::PlotGroupError;
use crate::domain::graph::ObjectGraph;

/// Index of the most recent bar with a defined timestamp, or `-1` if there is none.
pub fn last_available_index_of(datetime: &[f64]) -> isize {
    let missing = datetime
        .iter()
        .rev()
        .take_while(|ts| ts.is_nan())
        .count();
    datetime.len() as isize - 1 - missing as isize
}

/// [`last_available_index_of`] on the strategy's timeline (`None`) or on the feed
/// named `dataname`. Without a timeline of its own the strategy uses its first feed's.
pub fn last_available_index(
    graph: &ObjectGraph,
    dataname: Option<&str>,
) -> Result<isize, PlotGroupError> {
    let id = match dataname {
        Some(name) => graph.data_by_name(name)?,
        None => graph.strategy(),
    };
    Ok(last_available_index_of(graph.timeline(id)?))
}
