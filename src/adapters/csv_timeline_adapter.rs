//! CSV timestamp column adapter.

use crate::domain::error::PlotGroupError;
use crate::ports::timeline_port::TimelinePort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

const DATETIME_COLUMN: &str = "datetime";

pub struct CsvTimelineAdapter {
    base_path: PathBuf,
}

impl CsvTimelineAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, source: &Path) -> PathBuf {
        self.base_path.join(source)
    }
}

/// Parses one timestamp cell. Empty cells and `nan` are the missing marker.
pub fn parse_timestamp(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, fmt) {
            return Some(dt.and_utc().timestamp() as f64);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp() as f64);
    }
    cell.parse::<f64>().ok()
}

impl TimelinePort for CsvTimelineAdapter {
    fn fetch_timeline(&self, source: &Path) -> Result<Vec<f64>, PlotGroupError> {
        let path = self.csv_path(source);
        let file = path.display().to_string();
        let content = fs::read_to_string(&path).map_err(|e| PlotGroupError::Timeline {
            file: file.clone(),
            reason: format!("failed to read: {}", e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| PlotGroupError::Timeline {
            file: file.clone(),
            reason: format!("CSV header error: {}", e),
        })?;
        let column = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(DATETIME_COLUMN))
            .unwrap_or(0);

        let mut datetime = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| PlotGroupError::Timeline {
                file: file.clone(),
                reason: format!("CSV parse error: {}", e),
            })?;
            let cell = record.get(column).unwrap_or("");
            let ts = parse_timestamp(cell).ok_or_else(|| PlotGroupError::Timeline {
                file: file.clone(),
                reason: format!("invalid timestamp {:?} on row {}", cell, row + 1),
            })?;
            datetime.push(ts);
        }

        Ok(datetime)
    }
}
