use crate::i18n::{t, tr, tr_count};
use royal_core::{ReplaceOutcome, SelectionSession};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

/// Selection session plus the live-region text describing its last change.
///
/// Every mutation goes through [`SessionAction`] so that actions dispatched
/// before a re-render apply on top of each other.
#[derive(Clone, Default)]
pub struct SelectionState {
    /// `None` until the bundled history has been loaded.
    pub session: Option<SelectionSession>,
    pub announcement: AttrValue,
}

pub enum SessionAction {
    Loaded(SelectionSession),
    RerollAll,
    ReplaceOne(AttrValue),
    ToggleYear(AttrValue),
    Announce(AttrValue),
}

impl Reducible for SelectionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if let SessionAction::Loaded(session) = action {
            return Rc::new(Self {
                session: Some(session),
                announcement: self.announcement.clone(),
            });
        }
        if let SessionAction::Announce(text) = action {
            return Rc::new(Self {
                session: self.session.clone(),
                announcement: text,
            });
        }
        let Some(mut sess) = self.session.clone() else {
            return self;
        };
        let mut announcement = self.announcement.clone();

        match action {
            SessionAction::RerollAll => {
                let drawn = sess.reroll_all();
                log::info!(
                    "Rerolled {drawn} maps from {} candidates",
                    sess.filtered_count()
                );
                announcement = AttrValue::from(reroll_announcement(drawn));
            }
            SessionAction::ReplaceOne(id) => {
                let outcome = sess.replace_one(&id);
                match &outcome {
                    ReplaceOutcome::Replaced {
                        previous,
                        replacement,
                        ..
                    } => log::info!("Replaced {previous} with {replacement}"),
                    ReplaceOutcome::PoolExhausted => log::info!("No replacement left for {id}"),
                    ReplaceOutcome::NotDisplayed => {
                        log::warn!("Ignoring replace for map {id} that is not displayed");
                        return self;
                    }
                }
                if let Some(text) = replace_announcement(&outcome, &sess) {
                    announcement = AttrValue::from(text);
                }
            }
            SessionAction::ToggleYear(year) => match sess.toggle_year(&year) {
                Some(now_selected) => log::debug!("Year {year} selected: {now_selected}"),
                None => {
                    log::warn!("Ignoring toggle of unknown year {year}");
                    return self;
                }
            },
            SessionAction::Loaded(_) | SessionAction::Announce(_) => return self,
        }

        Rc::new(Self {
            session: Some(sess),
            announcement,
        })
    }
}

pub(crate) fn reroll_announcement(drawn: usize) -> String {
    tr_count("announce.rerolled", drawn)
}

/// Live-region text for a replacement; `None` when nothing visible changed.
pub(crate) fn replace_announcement(
    outcome: &ReplaceOutcome,
    session: &SelectionSession,
) -> Option<String> {
    match outcome {
        ReplaceOutcome::Replaced {
            index, replacement, ..
        } => {
            let position = (index + 1).to_string();
            let name = session
                .catalog()
                .get(replacement)
                .map_or_else(|| replacement.clone(), |m| m.name.clone());
            let mut args = BTreeMap::new();
            args.insert("position", position.as_str());
            args.insert("name", name.as_str());
            Some(tr("announce.replaced", Some(&args)))
        }
        ReplaceOutcome::PoolExhausted => Some(t("announce.exhausted")),
        ReplaceOutcome::NotDisplayed => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use royal_core::{Catalog, SelectionConfig};
    use std::sync::Arc;

    fn session() -> SelectionSession {
        let catalog = Arc::new(Catalog::load_from_static().unwrap());
        SelectionSession::new(catalog, &SelectionConfig::default(), 8)
    }

    fn loaded() -> Rc<SelectionState> {
        Rc::new(SelectionState::default()).reduce(SessionAction::Loaded(session()))
    }

    fn ids(state: &SelectionState) -> Vec<String> {
        state
            .session
            .as_ref()
            .map(|s| s.displayed_ids().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn reroll_text_tracks_count() {
        crate::i18n::set_lang("en");
        assert_eq!(reroll_announcement(5), "Drew 5 maps");
        assert_eq!(reroll_announcement(1), "Drew 1 map");
        assert_eq!(reroll_announcement(0), "No maps match the current filter");
    }

    #[test]
    fn replace_text_names_new_map() {
        crate::i18n::set_lang("en");
        let mut sess = session();
        sess.reroll_all();
        let first = sess.displayed_ids()[0].to_string();
        let outcome = sess.replace_one(&first);
        let text = replace_announcement(&outcome, &sess).unwrap();
        let new_name = sess.displayed()[0].name.clone();
        assert_eq!(text, format!("Map 1 replaced with {new_name}"));

        assert!(replace_announcement(&ReplaceOutcome::NotDisplayed, &sess).is_none());
        assert_eq!(
            replace_announcement(&ReplaceOutcome::PoolExhausted, &sess).as_deref(),
            Some("No other maps match the current filter")
        );
    }

    #[test]
    fn actions_before_load_are_ignored() {
        let empty = Rc::new(SelectionState::default());
        let after = Rc::clone(&empty).reduce(SessionAction::RerollAll);
        assert!(Rc::ptr_eq(&empty, &after));
        assert!(after.session.is_none());
    }

    #[test]
    fn back_to_back_toggles_both_apply() {
        let state = loaded();
        let before: Vec<String> = state
            .session
            .as_ref()
            .unwrap()
            .filter()
            .selected_years()
            .into_iter()
            .map(str::to_string)
            .collect();
        assert!(before.len() >= 2);

        let state = state
            .reduce(SessionAction::ToggleYear(AttrValue::from(before[0].clone())))
            .reduce(SessionAction::ToggleYear(AttrValue::from(before[1].clone())));
        let filter = state.session.as_ref().unwrap().filter();
        assert!(!filter.is_selected(&before[0]));
        assert!(!filter.is_selected(&before[1]));
        assert_eq!(filter.selected_count(), before.len() - 2);
    }

    #[test]
    fn back_to_back_replacements_keep_each_other() {
        crate::i18n::set_lang("en");
        let state = loaded().reduce(SessionAction::RerollAll);
        let shown = ids(&state);
        assert!(shown.len() >= 2);

        let state = state
            .reduce(SessionAction::ReplaceOne(AttrValue::from(shown[0].clone())))
            .reduce(SessionAction::ReplaceOne(AttrValue::from(shown[1].clone())));
        let after = ids(&state);
        assert_eq!(after.len(), shown.len());
        assert!(!after.contains(&shown[0]));
        assert!(!after.contains(&shown[1]));
        assert_eq!(after[2..], shown[2..]);
        assert!(state.announcement.starts_with("Map 2 replaced with"));
    }

    #[test]
    fn ignored_actions_keep_state() {
        let state = loaded().reduce(SessionAction::RerollAll);
        let again = Rc::clone(&state).reduce(SessionAction::ReplaceOne("nope".into()));
        assert!(Rc::ptr_eq(&state, &again));
        let again = Rc::clone(&state).reduce(SessionAction::ToggleYear("1899".into()));
        assert!(Rc::ptr_eq(&state, &again));
    }
}
