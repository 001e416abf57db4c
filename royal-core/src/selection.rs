//! Selection engine: filtered pool, random draws, and the displayed list
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::catalog::{Catalog, MapRecord};
use crate::config::SelectionConfig;
use crate::years::{YearFilter, YearZone};

/// Result of asking to swap one displayed map for a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced {
        index: usize,
        previous: String,
        replacement: String,
    },
    /// No eligible map is left outside the displayed set.
    PoolExhausted,
    /// The id is not part of the displayed list.
    NotDisplayed,
}

/// Values the status line is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub shown: usize,
    pub available: usize,
    /// Active years, present only when the range is narrowed.
    pub filtered_by: Option<Vec<String>>,
}

impl fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shown > 0 {
            write!(
                f,
                "Showing {} maps from {} available maps",
                self.shown, self.available
            )?;
        } else {
            write!(f, "{} maps available", self.available)?;
        }
        if let Some(years) = &self.filtered_by {
            write!(f, " (filtered by {})", years.join(", "))?;
        }
        Ok(())
    }
}

/// One user's randomizer state: filter, displayed maps, and the draw RNG.
///
/// The catalog is shared read-only; everything else is owned by the session.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    catalog: Arc<Catalog>,
    filter: YearFilter,
    zone: YearZone,
    target_count: usize,
    seed: u64,
    rng: ChaCha20Rng,
    /// Catalog positions, in display order.
    displayed: Vec<usize>,
}

impl SelectionSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: &SelectionConfig, seed: u64) -> Self {
        Self {
            catalog,
            filter: config.initial_filter(),
            zone: YearZone::default(),
            target_count: config.target_count,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            displayed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_zone(mut self, zone: YearZone) -> Self {
        self.zone = zone;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn filter(&self) -> &YearFilter {
        &self.filter
    }

    #[must_use]
    pub const fn zone(&self) -> YearZone {
        self.zone
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn target_count(&self) -> usize {
        self.target_count
    }

    /// Every map passing the year filter, in catalog order.
    #[must_use]
    pub fn filtered_catalog(&self) -> Vec<&MapRecord> {
        self.catalog
            .iter()
            .filter(|map| self.filter.admits(map, self.zone))
            .collect()
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.catalog
            .iter()
            .filter(|map| self.filter.admits(map, self.zone))
            .count()
    }

    /// Draw up to `count` distinct maps from the filtered pool, skipping `exclude_ids`.
    ///
    /// A pool smaller than `count` is returned whole, in random order.
    pub fn draw_random(&mut self, count: usize, exclude_ids: &HashSet<String>) -> Vec<&MapRecord> {
        let excluded: HashSet<usize> = exclude_ids
            .iter()
            .filter_map(|id| self.catalog.position(id))
            .collect();
        let picked = self.draw_positions(count, &excluded);
        picked
            .into_iter()
            .map(|pos| &self.catalog.maps()[pos])
            .collect()
    }

    /// Replace the displayed list with a fresh draw of the target size.
    ///
    /// Returns how many maps are now displayed.
    pub fn reroll_all(&mut self) -> usize {
        self.displayed = self.draw_positions(self.target_count, &HashSet::new());
        self.displayed.len()
    }

    /// Swap the displayed map `id` for one not currently displayed, keeping its position.
    pub fn replace_one(&mut self, id: &str) -> ReplaceOutcome {
        let Some(index) = self
            .displayed
            .iter()
            .position(|&pos| self.catalog.maps()[pos].id == id)
        else {
            return ReplaceOutcome::NotDisplayed;
        };
        let current: HashSet<usize> = self.displayed.iter().copied().collect();
        let Some(&fresh) = self.draw_positions(1, &current).first() else {
            return ReplaceOutcome::PoolExhausted;
        };
        let previous = std::mem::replace(&mut self.displayed[index], fresh);
        ReplaceOutcome::Replaced {
            index,
            previous: self.catalog.maps()[previous].id.clone(),
            replacement: self.catalog.maps()[fresh].id.clone(),
        }
    }

    /// Flip `year` in the filter. The displayed list is left untouched; only
    /// future draws see the new pool.
    pub fn toggle_year(&mut self, year: &str) -> Option<bool> {
        self.filter.toggle(year)
    }

    #[must_use]
    pub fn displayed(&self) -> Vec<&MapRecord> {
        self.displayed
            .iter()
            .map(|&pos| &self.catalog.maps()[pos])
            .collect()
    }

    #[must_use]
    pub fn displayed_ids(&self) -> Vec<&str> {
        self.displayed
            .iter()
            .map(|&pos| self.catalog.maps()[pos].id.as_str())
            .collect()
    }

    #[must_use]
    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    #[must_use]
    pub fn status(&self) -> StatusSummary {
        StatusSummary {
            shown: self.displayed.len(),
            available: self.filtered_count(),
            filtered_by: self.filter.is_narrowed().then(|| {
                self.filter
                    .selected_years()
                    .into_iter()
                    .map(ToString::to_string)
                    .collect()
            }),
        }
    }

    fn draw_positions(&mut self, count: usize, excluded: &HashSet<usize>) -> Vec<usize> {
        let mut pool: Vec<usize> = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(pos, map)| !excluded.contains(pos) && self.filter.admits(map, self.zone))
            .map(|(pos, _)| pos)
            .collect();
        let amount = count.min(pool.len());
        let (picked, _) = pool.partial_shuffle(&mut self.rng, amount);
        picked.to_vec()
    }
}
