//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::{Path, PathBuf};

pub struct FileConfigAdapter {
    config: Ini,
    base_dir: PathBuf,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { config, base_dir })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self {
            config,
            base_dir: PathBuf::new(),
        })
    }

    /// Directory relative paths in the file are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn has_section(&self, section: &str) -> bool {
        self.config.sections().iter().any(|s| s == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_graph_sections() {
        let content = r#"
[strategy]
label = SmaCross
datas = data.btc

[data.btc]
kind = data
name = BTC
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("strategy", "label"),
            Some("SmaCross".to_string())
        );
        assert_eq!(adapter.get_string("data.btc", "name"), Some("BTC".to_string()));
        assert!(adapter.has_section("data.btc"));
        assert!(!adapter.has_section("data.eth"));
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[plot]\ndataname = BTC\n").unwrap();
        assert_eq!(adapter.get_string("plot", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_list_splits_and_trims() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\ndatas = data.a , data.b,,data.c\n")
                .unwrap();
        assert_eq!(
            adapter.get_list("strategy", "datas"),
            vec!["data.a", "data.b", "data.c"]
        );
        assert!(adapter.get_list("strategy", "observers").is_empty());
    }

    #[test]
    fn get_bool_returns_true_values() {
        let adapter =
            FileConfigAdapter::from_string("[plot]\na = true\nb = yes\nc = 1\n").unwrap();
        assert!(adapter.get_bool("plot", "a", false).unwrap());
        assert!(adapter.get_bool("plot", "b", false).unwrap());
        assert!(adapter.get_bool("plot", "c", false).unwrap());
    }

    #[test]
    fn get_bool_returns_false_values() {
        let adapter =
            FileConfigAdapter::from_string("[plot]\na = false\nb = no\nc = 0\n").unwrap();
        assert!(!adapter.get_bool("plot", "a", true).unwrap());
        assert!(!adapter.get_bool("plot", "b", true).unwrap());
        assert!(!adapter.get_bool("plot", "c", true).unwrap());
    }

    #[test]
    fn get_bool_defaults_when_missing() {
        let adapter = FileConfigAdapter::from_string("[plot]\nsubplot = no\n").unwrap();
        assert!(adapter.get_bool("plot", "missing", true).unwrap());
        assert!(!adapter.get_bool("other", "subplot", false).unwrap());
    }

    #[test]
    fn get_bool_rejects_garbage() {
        let adapter = FileConfigAdapter::from_string("[plot]\nsubplot = maybe\n").unwrap();
        let err = adapter.get_bool("plot", "subplot", false).unwrap_err();
        assert!(matches!(
            err,
            crate::domain::error::PlotGroupError::ConfigInvalid { ref key, .. } if key == "subplot"
        ));
    }

    #[test]
    fn from_file_records_base_dir() {
        let file = create_temp_config("[strategy]\nlabel = s\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.base_dir(), file.path().parent().unwrap());
        assert_eq!(adapter.get_string("strategy", "label"), Some("s".to_string()));
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/graph.ini");
        assert!(result.is_err());
    }
}
