use crate::app::session::SelectionState;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppState {
    pub selection: UseReducerHandle<SelectionState>,
    pub boot_ready: UseStateHandle<bool>,
    pub load_failed: UseStateHandle<bool>,
    pub show_filters: UseStateHandle<bool>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        selection: use_reducer(SelectionState::default),
        boot_ready: use_state(|| false),
        load_failed: use_state(|| false),
        show_filters: use_state(|| false),
    }
}

impl AppState {
    #[must_use]
    pub fn session_ready(&self) -> bool {
        *self.boot_ready && self.selection.session.is_some()
    }
}
