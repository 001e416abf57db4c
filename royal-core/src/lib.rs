//! Royal Map Randomizer Engine
//!
//! Platform-agnostic core logic for the Royal Map Randomizer.
//! This crate provides the catalog store, the year filter, and the selection
//! engine without UI or platform-specific dependencies.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod selection;
pub mod years;

use std::sync::Arc;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, HistoryData, MapEvent, MapRecord, Votes};
pub use config::{ConfigError, SelectionConfig};
pub use selection::{ReplaceOutcome, SelectionSession, StatusSummary};
pub use years::{YearFilter, YearZone};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the map catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read or fails validation.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load the selection configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or parsed.
    fn load_selection_config(&self) -> Result<SelectionConfig, Self::Error>;
}

/// A freshly created session plus whatever went wrong while loading it.
///
/// Load failures never prevent a session: the affected input falls back to
/// an empty catalog or the default configuration.
#[derive(Debug)]
pub struct SessionBoot<E> {
    pub session: SelectionSession,
    pub errors: Vec<E>,
}

impl<E> SessionBoot<E> {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Entry point that turns a data loader into selection sessions
pub struct RandomizerEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> RandomizerEngine<L>
where
    L: DataLoader,
{
    /// Create a new engine with the provided data loader
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Create a session, requiring both the catalog and configuration to load.
    ///
    /// # Errors
    ///
    /// Returns the first loader error encountered.
    pub fn try_create_session(&self, seed: u64) -> Result<SelectionSession, L::Error> {
        let catalog = self.data_loader.load_catalog()?;
        let config = self.data_loader.load_selection_config()?;
        Ok(SelectionSession::new(Arc::new(catalog), &config, seed))
    }

    /// Create a session, substituting an empty catalog and the default
    /// year range for anything that fails to load.
    pub fn create_session(&self, seed: u64) -> SessionBoot<L::Error> {
        let mut errors = Vec::new();
        let (catalog, catalog_ok) = match self.data_loader.load_catalog() {
            Ok(catalog) => (catalog, true),
            Err(err) => {
                errors.push(err);
                (Catalog::empty(), false)
            }
        };
        let config = if catalog_ok {
            self.data_loader
                .load_selection_config()
                .unwrap_or_else(|err| {
                    errors.push(err);
                    SelectionConfig::default()
                })
        } else {
            SelectionConfig::default()
        };
        SessionBoot {
            session: SelectionSession::new(Arc::new(catalog), &config, seed),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::load_from_static().unwrap())
        }

        fn load_selection_config(&self) -> Result<SelectionConfig, Self::Error> {
            Ok(SelectionConfig::default())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("broken fixture")]
    struct Broken;

    struct BrokenCatalog;

    impl DataLoader for BrokenCatalog {
        type Error = Broken;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Err(Broken)
        }

        fn load_selection_config(&self) -> Result<SelectionConfig, Self::Error> {
            Ok(SelectionConfig {
                available_years: vec!["1999".to_string()],
                default_selected: None,
                target_count: 2,
            })
        }
    }

    struct BrokenConfig;

    impl DataLoader for BrokenConfig {
        type Error = Broken;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::load_from_static().unwrap())
        }

        fn load_selection_config(&self) -> Result<SelectionConfig, Self::Error> {
            Err(Broken)
        }
    }

    #[test]
    fn engine_creates_seeded_sessions() {
        let engine = RandomizerEngine::new(FixtureLoader);
        let mut a = engine.try_create_session(42).unwrap();
        let mut b = engine.try_create_session(42).unwrap();
        assert_eq!(a.seed(), 42);
        a.reroll_all();
        b.reroll_all();
        assert_eq!(a.displayed_ids(), b.displayed_ids());
        assert!(engine.create_session(1).is_clean());
    }

    #[test]
    fn broken_catalog_falls_back_to_empty_with_default_range() {
        let engine = RandomizerEngine::new(BrokenCatalog);
        assert!(engine.try_create_session(1).is_err());

        let boot = engine.create_session(1);
        assert_eq!(boot.errors.len(), 1);
        let mut session = boot.session;
        assert!(session.catalog().is_empty());
        assert_eq!(session.filter().available_years().len(), 5);
        assert_eq!(session.target_count(), 5);
        assert_eq!(session.reroll_all(), 0);
    }

    #[test]
    fn broken_config_keeps_catalog() {
        let boot = RandomizerEngine::new(BrokenConfig).create_session(3);
        assert_eq!(boot.errors.len(), 1);
        assert!(!boot.session.catalog().is_empty());
        assert_eq!(boot.session.filter().available_years()[0], "2021");
    }
}
