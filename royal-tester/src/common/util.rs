use royal_core::SelectionSession;
use std::collections::BTreeSet;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Toggle years until the session's selection is exactly `wanted`.
pub fn select_exactly(session: &mut SelectionSession, wanted: &BTreeSet<String>) {
    let years = session.filter().available_years().to_vec();
    for year in &years {
        if session.filter().is_selected(year) != wanted.contains(year) {
            session.toggle_year(year);
        }
    }
}

/// Owned copy of the displayed ids, for before/after comparisons.
pub fn displayed_ids(session: &SelectionSession) -> Vec<String> {
    session
        .displayed_ids()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
