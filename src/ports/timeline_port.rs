//! Timestamp series access port trait.

use crate::domain::error::PlotGroupError;
use std::path::Path;

pub trait TimelinePort {
    /// Timestamps in seconds since the epoch, `NaN` for bars not yet populated.
    fn fetch_timeline(&self, source: &Path) -> Result<Vec<f64>, PlotGroupError>;
}
