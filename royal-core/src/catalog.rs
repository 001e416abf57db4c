//! Static map catalog loaded once at startup
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::constants::SUPPORTED_HISTORY_FORMAT;
use crate::years::YearZone;

const DEFAULT_HISTORY_DATA: &str = include_str!("../../royal-web/static/assets/data/history.json");

/// A dated appearance of a map (e.g. a weekly Royal rotation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEvent {
    #[serde(deserialize_with = "event_time")]
    pub at: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "lenient")]
    pub event: String,
    #[serde(default, deserialize_with = "lenient")]
    pub uid: String,
}

/// Vote tally snapshot carried along with a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Votes {
    #[serde(default, deserialize_with = "lenient")]
    pub tally: Vec<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub recorded: String,
}

/// One entry of the catalog.
///
/// Only `uid`, `name` and `events` are load-bearing. The remaining fields are
/// display payload and fall back to their defaults when malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRecord {
    #[serde(rename = "uid")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub author: String,
    pub events: Vec<MapEvent>,
    /// Author medal time in milliseconds
    #[serde(rename = "authorTime", default, deserialize_with = "lenient")]
    pub author_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub votes: Option<Votes>,
    #[serde(default, deserialize_with = "lenient")]
    pub download: Option<String>,
}

/// Accept any JSON value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Event timestamps are ISO 8601. Without an offset a date-time is read as
/// local time and a bare date as UTC midnight, matching browser `Date` parsing.
fn event_time<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_event_time(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid event timestamp {raw:?}")))
}

fn parse_event_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at);
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|at| at.fixed_offset())
            .unwrap_or_else(|| naive.and_utc().fixed_offset());
        return Some(local);
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

impl MapRecord {
    /// Author time rendered the way the game shows it, e.g. `0:45.123`.
    #[must_use]
    pub fn author_time_label(&self) -> Option<String> {
        self.author_time.map(|ms| {
            let minutes = ms / 60_000;
            let seconds = (ms / 1_000) % 60;
            let millis = ms % 1_000;
            format!("{minutes}:{seconds:02}.{millis:03}")
        })
    }

    /// Calendar years of every event, as seen from `zone`.
    pub fn event_years(&self, zone: YearZone) -> impl Iterator<Item = i32> + '_ {
        self.events.iter().map(move |event| zone.year_of(&event.at))
    }
}

/// The dataset document as shipped in `history.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryData {
    pub format: u32,
    pub generated: DateTime<FixedOffset>,
    pub maps: Vec<MapRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("dataset source unavailable: {0}")]
    Source(String),
    #[error("dataset JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported dataset format {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },
    #[error("map at position {index} has an empty id")]
    MissingId { index: usize },
    #[error("map {id} has an empty name")]
    MissingName { id: String },
    #[error("duplicate map id {id}")]
    DuplicateId { id: String },
}

/// Immutable, ordered collection of every known map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    generated: Option<DateTime<FixedOffset>>,
    maps: Vec<MapRecord>,
}

impl Catalog {
    /// Create an empty catalog (the fallback when loading fails)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a history document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, carries an unsupported
    /// format tag, or contains invalid or duplicate map records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let history: HistoryData = serde_json::from_str(json)?;
        Self::from_history(history)
    }

    /// Validate an already parsed history document.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported format tag or invalid map records.
    pub fn from_history(history: HistoryData) -> Result<Self, CatalogError> {
        if history.format != SUPPORTED_HISTORY_FORMAT {
            return Err(CatalogError::UnsupportedFormat {
                found: history.format,
                expected: SUPPORTED_HISTORY_FORMAT,
            });
        }
        let mut catalog = Self::from_maps(history.maps)?;
        catalog.generated = Some(history.generated);
        Ok(catalog)
    }

    /// Build a catalog from bare records, enforcing id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if a record has an empty id or name, or if two records share an id.
    pub fn from_maps(maps: Vec<MapRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(maps.len());
        for (index, map) in maps.iter().enumerate() {
            if map.id.trim().is_empty() {
                return Err(CatalogError::MissingId { index });
            }
            if map.name.trim().is_empty() {
                return Err(CatalogError::MissingName { id: map.id.clone() });
            }
            if !seen.insert(map.id.as_str()) {
                return Err(CatalogError::DuplicateId { id: map.id.clone() });
            }
        }
        Ok(Self {
            generated: None,
            maps,
        })
    }

    /// Load the dataset embedded at build time.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded dataset fails validation.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_HISTORY_DATA)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MapRecord> {
        self.maps.iter()
    }

    #[must_use]
    pub fn maps(&self) -> &[MapRecord] {
        &self.maps
    }

    #[must_use]
    pub const fn generated(&self) -> Option<&DateTime<FixedOffset>> {
        self.generated.as_ref()
    }

    /// Find a map by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MapRecord> {
        self.maps.iter().find(|map| map.id == id)
    }

    /// Catalog position of the map with `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.maps.iter().position(|map| map.id == id)
    }

    /// Distinct event years present in the data. Informational only; the
    /// selectable range comes from configuration.
    #[must_use]
    pub fn event_years(&self, zone: YearZone) -> BTreeSet<i32> {
        self.maps
            .iter()
            .flat_map(|map| map.event_years(zone))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MapRecord;
    type IntoIter = std::slice::Iter<'a, MapRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.maps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(maps: &str) -> String {
        format!(r#"{{"format": 1, "generated": "2025-03-01T12:00:00+00:00", "maps": {maps}}}"#)
    }

    #[test]
    fn parses_history_document() {
        let json = history(
            r#"[{
                "uid": "abc",
                "name": "Royal Sprint",
                "author": "Nadeo",
                "events": [{"at": "2022-05-01T17:00:00+00:00", "event": "royal", "uid": "e1"}],
                "authorTime": 45123,
                "votes": {"tally": [1, 2, 3], "recorded": "2025-01-01"},
                "download": "https://example.invalid/abc.Map.Gbx"
            }]"#,
        );
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.generated().is_some());
        let map = catalog.get("abc").unwrap();
        assert_eq!(map.name, "Royal Sprint");
        assert_eq!(map.events.len(), 1);
        assert_eq!(map.author_time_label().as_deref(), Some("0:45.123"));
        assert_eq!(map.votes.as_ref().unwrap().tally, vec![1, 2, 3]);
    }

    #[test]
    fn optional_payload_defaults() {
        let json = history(r#"[{"uid": "a", "name": "A", "author": "x", "events": []}]"#);
        let catalog = Catalog::from_json(&json).unwrap();
        let map = catalog.get("a").unwrap();
        assert!(map.author_time.is_none());
        assert!(map.votes.is_none());
        assert!(map.download.is_none());
        assert!(map.author_time_label().is_none());
    }

    #[test]
    fn malformed_payload_keeps_the_map() {
        let json = history(
            r#"[
                {"uid": "a", "name": "A", "author": null, "events": [],
                 "authorTime": "fast", "download": 7,
                 "votes": {"tally": [1], "recorded": null}},
                {"uid": "b", "name": "B", "author": "y", "events": [],
                 "votes": "n/a"}
            ]"#,
        );
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.len(), 2);

        let a = catalog.get("a").unwrap();
        assert_eq!(a.author, "");
        assert!(a.author_time.is_none());
        assert!(a.download.is_none());
        let votes = a.votes.as_ref().unwrap();
        assert_eq!(votes.tally, vec![1]);
        assert!(votes.recorded.is_empty());

        assert!(catalog.get("b").unwrap().votes.is_none());
    }

    #[test]
    fn event_time_without_offset_is_local() {
        let json = history(
            r#"[{"uid": "a", "name": "A", "author": "x", "events": [
                {"at": "2022-01-05T17:00:00", "event": null},
                {"at": "2023-06-30"}
            ]}]"#,
        );
        let catalog = Catalog::from_json(&json).unwrap();
        let map = catalog.get("a").unwrap();
        assert_eq!(
            map.events[0].at.naive_local(),
            NaiveDate::from_ymd_opt(2022, 1, 5)
                .and_then(|d| d.and_hms_opt(17, 0, 0))
                .unwrap()
        );
        assert!(map.events[0].event.is_empty());
        assert_eq!(map.event_years(YearZone::Local).next(), Some(2022));
        assert_eq!(map.events[1].at.offset().local_minus_utc(), 0);
        assert_eq!(map.event_years(YearZone::utc()).nth(1), Some(2023));
    }

    #[test]
    fn rejects_missing_events() {
        let json = history(r#"[{"uid": "a", "name": "A", "author": "x"}]"#);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn rejects_missing_uid() {
        let json = history(r#"[{"name": "A", "author": "x", "events": []}]"#);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn rejects_bad_timestamp() {
        let json = history(
            r#"[{"uid": "a", "name": "A", "author": "x", "events": [{"at": "yesterday"}]}]"#,
        );
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn rejects_blank_id_and_name() {
        let json = history(r#"[{"uid": " ", "name": "A", "author": "x", "events": []}]"#);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::MissingId { index: 0 })
        ));

        let json = history(r#"[{"uid": "a", "name": "", "author": "x", "events": []}]"#);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::MissingName { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = history(
            r#"[
                {"uid": "a", "name": "A", "author": "x", "events": []},
                {"uid": "a", "name": "B", "author": "y", "events": []}
            ]"#,
        );
        match Catalog::from_json(&json) {
            Err(CatalogError::DuplicateId { id }) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        let json = r#"{"format": 2, "generated": "2025-03-01T12:00:00Z", "maps": []}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::UnsupportedFormat {
                found: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn author_time_label_handles_minutes() {
        let map = MapRecord {
            id: "a".into(),
            name: "A".into(),
            author: "x".into(),
            events: Vec::new(),
            author_time: Some(61_005),
            votes: None,
            download: None,
        };
        assert_eq!(map.author_time_label().as_deref(), Some("1:01.005"));
    }

    #[test]
    fn embedded_dataset_loads() {
        let catalog = Catalog::load_from_static().unwrap();
        assert!(!catalog.is_empty());
        let years = catalog.event_years(YearZone::utc());
        assert!(years.iter().all(|year| (2021..=2025).contains(year)));
    }
}
