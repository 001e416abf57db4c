use crate::i18n::{t, tr_count};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub target_count: usize,
    pub on_draw: Callback<()>,
}

#[function_component(EmptyState)]
pub fn empty_state(p: &Props) -> Html {
    let on_draw = {
        let cb = p.on_draw.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="empty-state" aria-labelledby="empty-state-title">
            <span class="empty-state__icon" aria-hidden="true">{"⤨"}</span>
            <h2 id="empty-state-title">{ t("empty.title") }</h2>
            <p>{ tr_count("empty.hint", p.target_count) }</p>
            <button type="button" class="btn btn-primary" onclick={on_draw}>
                { t("actions.get_random") }
            </button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn empty_state_prompts_for_a_draw() {
        let props = Props {
            target_count: 5,
            on_draw: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<EmptyState>::with_props(props).render());
        assert!(html.contains("No Maps Selected"));
        assert!(html.contains("to get 5 random Trackmania maps"));
        assert!(html.contains("Get Random Maps"));
    }
}
