use crate::components::modal::Modal;
use crate::i18n::t;
use yew::prelude::*;

/// One checkbox row of the year filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearChoice {
    pub year: AttrValue,
    pub checked: bool,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub years: Vec<YearChoice>,
    pub on_toggle: Callback<AttrValue>,
    /// Fired by Save, Escape and the close button alike.
    pub on_save: Callback<()>,
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
}

#[function_component(YearFilterDialog)]
pub fn year_filter_dialog(p: &Props) -> Html {
    let on_save = {
        let cb = p.on_save.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let rows = p.years.iter().map(|choice| {
        let input_id = format!("year-{}", choice.year);
        let on_change = {
            let cb = p.on_toggle.clone();
            let year = choice.year.clone();
            Callback::from(move |_: Event| cb.emit(year.clone()))
        };
        html! {
            <li class="year-filter__row" key={choice.year.to_string()}>
                <input
                    id={input_id.clone()}
                    type="checkbox"
                    class="checkbox"
                    checked={choice.checked}
                    onchange={on_change}
                />
                <label for={input_id}>{ choice.year.clone() }</label>
            </li>
        }
    });

    html! {
        <Modal
            open={p.open}
            title={AttrValue::from(t("filter.title"))}
            description={Some(AttrValue::from(t("filter.description")))}
            on_close={p.on_save.clone()}
            return_focus_id={p.return_focus_id.clone()}
        >
            <fieldset class="year-filter">
                <legend class="sr-only">{ t("filter.title") }</legend>
                <ul class="year-filter__list">{ for rows }</ul>
            </fieldset>
            <div class="modal__actions">
                <button type="button" class="btn btn-primary" onclick={on_save}>{ t("filter.save") }</button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn choices(checked: &[bool]) -> Vec<YearChoice> {
        ["2021", "2022", "2023"]
            .iter()
            .zip(checked)
            .map(|(year, checked)| YearChoice {
                year: AttrValue::from(*year),
                checked: *checked,
            })
            .collect()
    }

    #[test]
    fn open_dialog_lists_each_year_with_state() {
        let props = Props {
            open: true,
            years: choices(&[true, false, true]),
            on_toggle: Callback::noop(),
            on_save: Callback::noop(),
            return_focus_id: None,
        };
        let html = block_on(LocalServerRenderer::<YearFilterDialog>::with_props(props).render());
        assert!(html.contains("Filter by Year"));
        assert!(html.contains("id=\"year-2021\""));
        assert!(html.contains("for=\"year-2022\""));
        assert_eq!(html.matches("type=\"checkbox\"").count(), 3);
        assert!(html.contains(">Save<"));
    }

    #[test]
    fn closed_dialog_is_empty() {
        let props = Props {
            open: false,
            years: choices(&[true, true, true]),
            on_toggle: Callback::noop(),
            on_save: Callback::noop(),
            return_focus_id: None,
        };
        let html = block_on(LocalServerRenderer::<YearFilterDialog>::with_props(props).render());
        assert!(!html.contains("year-2021"));
    }
}
