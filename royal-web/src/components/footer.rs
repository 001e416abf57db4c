use crate::i18n::{t, tr};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone, Default)]
pub struct Props {
    /// Snapshot date of the bundled history, already formatted.
    #[prop_or_default]
    pub generated: Option<AttrValue>,
}

#[function_component(Footer)]
pub fn footer(p: &Props) -> Html {
    let snapshot = p.generated.as_ref().map(|date| {
        let mut args = BTreeMap::new();
        args.insert("date", date.as_str());
        html! { <p class="footer__snapshot">{ tr("footer.snapshot", Some(&args)) }</p> }
    });
    html! {
        <footer class="app-footer">
            <p class="footer__note">{ t("footer.note") }</p>
            { snapshot.unwrap_or_default() }
        </footer>
    }
}
