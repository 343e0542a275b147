//! Configuration access port trait.

use crate::domain::error::PlotGroupError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn has_section(&self, section: &str) -> bool;

    /// `default` when the key is absent. A value [`parse_bool`] rejects is
    /// `ConfigInvalid`.
    fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool, PlotGroupError> {
        match self.get_string(section, key) {
            None => Ok(default),
            Some(value) => parse_bool(&value).ok_or_else(|| PlotGroupError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("expected a boolean, got {:?}", value),
            }),
        }
    }

    /// Comma-separated value split into trimmed, non-empty items.
    fn get_list(&self, section: &str, key: &str) -> Vec<String> {
        self.get_string(section, key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Accepts true/yes/1 and false/no/0, case-insensitively.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
