//! Filesystem data loader for the tester
use royal_core::{Catalog, CatalogError, ConfigError, DataLoader, SelectionConfig};
use std::path::{Path, PathBuf};

/// Reads the dataset and selection config from disk, falling back to the
/// bundled assets for whichever path is not given.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    data: Option<PathBuf>,
    config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FsLoader {
    #[must_use]
    pub const fn new(data: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        Self { data, config }
    }

    #[must_use]
    pub fn data_label(&self) -> String {
        label(self.data.as_deref())
    }

    #[must_use]
    pub fn config_label(&self) -> String {
        label(self.config.as_deref())
    }
}

fn label(path: Option<&Path>) -> String {
    path.map_or_else(|| "embedded".to_string(), |p| p.display().to_string())
}

fn read(path: &Path) -> Result<String, LoaderError> {
    std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl DataLoader for FsLoader {
    type Error = LoaderError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        match &self.data {
            Some(path) => Ok(Catalog::from_json(&read(path)?)?),
            None => Ok(Catalog::load_from_static()?),
        }
    }

    fn load_selection_config(&self) -> Result<SelectionConfig, Self::Error> {
        match &self.config {
            Some(path) => Ok(SelectionConfig::from_json(&read(path)?)?),
            None => Ok(SelectionConfig::load_from_static()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(label: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "royal-loader-{label}-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_to_embedded_assets() {
        let loader = FsLoader::default();
        assert!(!loader.load_catalog().unwrap().is_empty());
        assert_eq!(loader.load_selection_config().unwrap().target_count, 5);
        assert_eq!(loader.data_label(), "embedded");
    }

    #[test]
    fn reads_files_and_reports_bad_ones() {
        let config = temp_file("config", r#"{"available_years":["2022","2023"],"target_count":3}"#);
        let loader = FsLoader::new(None, Some(config.clone()));
        let cfg = loader.load_selection_config().unwrap();
        assert_eq!(cfg.available_years, vec!["2022", "2023"]);
        assert_eq!(cfg.target_count, 3);

        let data = temp_file(
            "data",
            r#"{"format":9,"generated":"2025-01-01T00:00:00+00:00","maps":[]}"#,
        );
        let err = FsLoader::new(Some(data.clone()), None)
            .load_catalog()
            .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Catalog(CatalogError::UnsupportedFormat { found: 9, .. })
        ));

        let missing = FsLoader::new(Some(PathBuf::from("/nonexistent/history.json")), None);
        assert!(matches!(missing.load_catalog(), Err(LoaderError::Io { .. })));

        let _ = std::fs::remove_file(config);
        let _ = std::fs::remove_file(data);
    }
}
