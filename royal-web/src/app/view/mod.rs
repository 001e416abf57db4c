mod handlers;

pub use handlers::AppHandlers;

use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::ui::action_bar::{ActionBar, FILTER_BUTTON_ID};
use crate::components::ui::empty_state::EmptyState;
use crate::components::ui::map_list::{MapList, MapRow};
use crate::components::ui::status_line::StatusLine;
use crate::components::ui::year_filter_dialog::{YearChoice, YearFilterDialog};
use crate::i18n::t;
use royal_core::SelectionSession;
use yew::prelude::*;

pub const STATUS_REGION_ID: &str = "randomizer-status";

fn year_choices(session: &SelectionSession) -> Vec<YearChoice> {
    let filter = session.filter();
    filter
        .available_years()
        .iter()
        .map(|year| YearChoice {
            year: AttrValue::from(year.clone()),
            checked: filter.is_selected(year),
        })
        .collect()
}

fn render_session(state: &AppState, handlers: &AppHandlers, session: &SelectionSession) -> Html {
    let rows: Vec<MapRow> = session
        .displayed()
        .into_iter()
        .map(MapRow::from_record)
        .collect();
    let body = if rows.is_empty() {
        html! { <EmptyState target_count={session.target_count()} on_draw={handlers.reroll_all.clone()} /> }
    } else {
        html! { <MapList maps={rows} on_remove={handlers.replace_one.clone()} /> }
    };
    let warning = (*state.load_failed).then(|| {
        html! { <p class="load-warning" role="alert">{ t("app.load_failed") }</p> }
    });

    html! {
        <>
            <ActionBar
                selected_count={session.filter().selected_count()}
                on_reroll={handlers.reroll_all.clone()}
                on_open_filters={handlers.open_filters.clone()}
            />
            <YearFilterDialog
                open={*state.show_filters}
                years={year_choices(session)}
                on_toggle={handlers.toggle_year.clone()}
                on_save={handlers.save_filters.clone()}
                return_focus_id={Some(AttrValue::from(FILTER_BUTTON_ID))}
            />
            { warning.unwrap_or_default() }
            { body }
            <StatusLine summary={session.status()} />
        </>
    }
}

pub fn render_app(state: &AppState) -> Html {
    let handlers = AppHandlers::new(state);
    let session = state.selection.session.as_ref().filter(|_| state.session_ready());
    let main_view = session.map_or_else(
        || html! { <p class="boot-progress" role="status">{ t("app.loading") }</p> },
        |session| render_session(state, &handlers, session),
    );
    let generated = session
        .and_then(|s| s.catalog().generated().map(|at| at.format("%Y-%m-%d").to_string()))
        .map(AttrValue::from);

    html! {
        <>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <Header />
            <main id="main" role="main" class="randomizer">
                { main_view }
                <p id={STATUS_REGION_ID} class="sr-only" aria-live="polite" aria-atomic="true">
                    { state.selection.announcement.clone() }
                </p>
            </main>
            <Footer {generated} />
        </>
    }
}
