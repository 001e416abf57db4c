use anyhow::{Context, Result};
use royal_core::{Catalog, DataLoader, SelectionConfig, SelectionSession, YearZone};
use std::sync::Arc;

pub mod catalog;

use catalog::catalog_scenarios;

/// Shared inputs for every scenario run: the loaded dataset and year range.
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub catalog: Arc<Catalog>,
    pub config: SelectionConfig,
    pub zone: YearZone,
    pub verbose: bool,
}

impl ScenarioCtx {
    /// Load the dataset and configuration through `loader`.
    ///
    /// Years are evaluated in UTC so runs reproduce across machines.
    pub fn load<L: DataLoader>(loader: &L, verbose: bool) -> Result<Self> {
        let catalog = loader.load_catalog().context("loading map history")?;
        let config = loader
            .load_selection_config()
            .context("loading selection config")?;
        Ok(Self {
            catalog: Arc::new(catalog),
            config,
            zone: YearZone::utc(),
            verbose,
        })
    }

    #[must_use]
    pub fn session(&self, seed: u64) -> SelectionSession {
        SelectionSession::new(Arc::clone(&self.catalog), &self.config, seed).with_zone(self.zone)
    }
}

pub type ScenarioCheck = fn(&ScenarioCtx, u64) -> Result<()>;

/// One named invariant check, run once per iteration seed.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    check: ScenarioCheck,
}

impl TestScenario {
    #[must_use]
    pub const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        check: ScenarioCheck,
    ) -> Self {
        Self {
            key,
            name,
            description,
            check,
        }
    }

    pub fn run(&self, ctx: &ScenarioCtx, seed: u64) -> Result<()> {
        (self.check)(ctx, seed)
    }
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .iter()
        .map(|s| (s.key, s.description))
        .collect()
}

#[must_use]
pub fn scenario_keys() -> Vec<&'static str> {
    catalog_scenarios().iter().map(|s| s.key).collect()
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<TestScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|s| s.key.eq_ignore_ascii_case(key))
}
