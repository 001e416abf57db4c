//! Year filter over map event timestamps
use chrono::{DateTime, Datelike, FixedOffset, Local, Offset, Utc};
use std::collections::BTreeSet;

use crate::catalog::MapRecord;

/// Time zone in which an event's calendar year is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearZone {
    /// The observer's zone, resolved per timestamp so DST shifts apply.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl YearZone {
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    #[must_use]
    pub fn year_of(self, at: &DateTime<FixedOffset>) -> i32 {
        match self {
            Self::Local => at.with_timezone(&Local).year(),
            Self::Fixed(offset) => at.with_timezone(&offset).year(),
        }
    }
}

/// Selectable year range plus the currently active subset.
///
/// The active subset can only ever contain labels from the available range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFilter {
    available: Vec<String>,
    selected: BTreeSet<String>,
}

impl YearFilter {
    /// Filter over `available` with every year selected.
    #[must_use]
    pub fn new<I, S>(available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = Vec::new();
        for label in available {
            let label = label.into();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        let selected = labels.iter().cloned().collect();
        Self {
            available: labels,
            selected,
        }
    }

    /// Filter over `available` with only `selected` active. Unknown labels are dropped.
    #[must_use]
    pub fn with_selected<I, S, J, T>(available: I, selected: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut filter = Self::new(available);
        let wanted: BTreeSet<String> = selected
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        filter.selected.retain(|label| wanted.contains(label));
        filter
    }

    #[must_use]
    pub fn available_years(&self) -> &[String] {
        &self.available
    }

    /// Active labels in range order.
    #[must_use]
    pub fn selected_years(&self) -> Vec<&str> {
        self.available
            .iter()
            .filter(|label| self.selected.contains(*label))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_selected(&self, year: &str) -> bool {
        self.selected.contains(year)
    }

    /// No year is active, so nothing is filtered out.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.selected.is_empty()
    }

    /// Some but not all of the range is active.
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        self.selected.len() < self.available.len()
    }

    /// Flip membership of `year`. Returns the new membership, or `None` when
    /// `year` is outside the available range (nothing changes).
    pub fn toggle(&mut self, year: &str) -> Option<bool> {
        if !self.available.iter().any(|label| label == year) {
            return None;
        }
        if self.selected.remove(year) {
            Some(false)
        } else {
            self.selected.insert(year.to_string());
            Some(true)
        }
    }

    /// Whether `record` belongs to the filtered pool.
    ///
    /// An empty selection admits everything.
    #[must_use]
    pub fn admits(&self, record: &MapRecord, zone: YearZone) -> bool {
        if self.selected.is_empty() {
            return true;
        }
        record
            .event_years(zone)
            .any(|year| self.selected.contains(&year.to_string()))
    }
}
