use crate::app::session::SessionAction;
use crate::app::state::AppState;
use crate::i18n::t;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppHandlers {
    pub reroll_all: Callback<()>,
    pub replace_one: Callback<AttrValue>,
    pub toggle_year: Callback<AttrValue>,
    pub open_filters: Callback<()>,
    pub save_filters: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            reroll_all: build_reroll_all(state),
            replace_one: build_replace_one(state),
            toggle_year: build_toggle_year(state),
            open_filters: build_open_filters(state),
            save_filters: build_save_filters(state),
        }
    }
}

fn build_reroll_all(state: &AppState) -> Callback<()> {
    let selection = state.selection.clone();
    Callback::from(move |()| selection.dispatch(SessionAction::RerollAll))
}

fn build_replace_one(state: &AppState) -> Callback<AttrValue> {
    let selection = state.selection.clone();
    Callback::from(move |id: AttrValue| selection.dispatch(SessionAction::ReplaceOne(id)))
}

fn build_toggle_year(state: &AppState) -> Callback<AttrValue> {
    let selection = state.selection.clone();
    Callback::from(move |year: AttrValue| selection.dispatch(SessionAction::ToggleYear(year)))
}

fn build_open_filters(state: &AppState) -> Callback<()> {
    let show_filters = state.show_filters.clone();
    Callback::from(move |()| show_filters.set(true))
}

fn build_save_filters(state: &AppState) -> Callback<()> {
    let show_filters = state.show_filters.clone();
    let selection = state.selection.clone();
    Callback::from(move |()| {
        show_filters.set(false);
        selection.dispatch(SessionAction::Announce(AttrValue::from(t(
            "announce.filters_saved",
        ))));
    })
}
