//! Web-specific data loading
//!
//! The map history and the year range ship inside the bundle, so loading never
//! touches the network.

use royal_core::{Catalog, CatalogError, ConfigError, DataLoader, RandomizerEngine, SelectionConfig};

const HISTORY_JSON: &str = include_str!("../static/assets/data/history.json");
const SELECTION_JSON: &str = include_str!("../static/assets/data/selection.json");

/// Data loader backed by the bundled static assets
#[derive(Clone, Copy, Debug, Default)]
pub struct WebDataLoader;

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("map history is invalid: {0}")]
    Catalog(#[from] CatalogError),
    #[error("year range is invalid: {0}")]
    Config(#[from] ConfigError),
}

impl DataLoader for WebDataLoader {
    type Error = WebDataError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(Catalog::from_json(HISTORY_JSON)?)
    }

    fn load_selection_config(&self) -> Result<SelectionConfig, Self::Error> {
        Ok(SelectionConfig::from_json(SELECTION_JSON)?)
    }
}

/// Create a randomizer engine over the bundled assets
#[must_use]
pub const fn create_web_engine() -> RandomizerEngine<WebDataLoader> {
    RandomizerEngine::new(WebDataLoader)
}

/// Seed for a fresh browser session.
#[must_use]
pub fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().to_bits() ^ js_sys::Math::random().to_bits().rotate_left(17)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }
}
