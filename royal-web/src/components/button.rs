use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    /// Decorative glyph rendered before the label and hidden from screen readers.
    #[prop_or_default]
    pub icon: Option<AttrValue>,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    #[prop_or_default]
    pub aria_haspopup: Option<AttrValue>,
}

#[function_component(Button)]
pub fn button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    let class = classes!("btn", p.class.clone());
    html! {
        <button
            type="button"
            id={p.id.clone()}
            {class}
            aria-label={p.aria_label.clone()}
            aria-haspopup={p.aria_haspopup.clone()}
            {onclick}
        >
            { p.icon.as_ref().map(|icon| html! {
                <span class="btn__icon" aria-hidden="true">{ icon.clone() }</span>
            }).unwrap_or_default() }
            <span class="btn__label">{ p.label.clone() }</span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn button_renders_label() {
        let props = Props {
            label: AttrValue::from("Confirm"),
            onclick: Callback::noop(),
            id: Some("confirm-btn".into()),
            class: classes!("primary"),
            icon: Some("↻".into()),
            aria_label: None,
            aria_haspopup: None,
        };
        let html = block_on(LocalServerRenderer::<Button>::with_props(props).render());
        assert!(html.contains("Confirm"));
        assert!(html.contains("id=\"confirm-btn\""));
        assert!(html.contains("btn primary"));
        assert!(html.contains("aria-hidden=\"true\""));
    }
}
