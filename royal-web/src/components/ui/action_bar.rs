use crate::components::button::Button;
use crate::i18n::{t, tr_count};
use yew::prelude::*;

pub const FILTER_BUTTON_ID: &str = "filter-open-btn";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Number of checked years, shown on the filter button.
    pub selected_count: usize,
    pub on_reroll: Callback<()>,
    pub on_open_filters: Callback<()>,
}

#[function_component(ActionBar)]
pub fn action_bar(p: &Props) -> Html {
    let on_reroll = {
        let cb = p.on_reroll.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_filters = {
        let cb = p.on_open_filters.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="action-bar" role="toolbar" aria-label={t("list.title")}>
            <Button
                id={Some(AttrValue::from("reroll-all-btn"))}
                class={classes!("btn-primary")}
                icon={Some(AttrValue::from("⤨"))}
                label={AttrValue::from(t("actions.reroll_all"))}
                onclick={on_reroll}
            />
            <Button
                id={Some(AttrValue::from(FILTER_BUTTON_ID))}
                class={classes!("btn-secondary")}
                icon={Some(AttrValue::from("⚲"))}
                label={AttrValue::from(tr_count("actions.filter", p.selected_count))}
                aria_haspopup={Some(AttrValue::from("dialog"))}
                onclick={on_filters}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn filter_button_shows_selected_year_count() {
        let props = Props {
            selected_count: 3,
            on_reroll: Callback::noop(),
            on_open_filters: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ActionBar>::with_props(props).render());
        assert!(html.contains("Reroll All Maps"));
        assert!(html.contains("Filter by Year (3)"));
        assert!(html.contains("aria-haspopup=\"dialog\""));
    }
}
