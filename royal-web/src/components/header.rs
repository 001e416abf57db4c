use crate::i18n::t;
use yew::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header role="banner" class="app-header">
            <a href="#main" class="sr-only">{ t("app.skip_to_content") }</a>
            <h1 class="app-title">{ t("app.title") }</h1>
            <p class="app-subtitle">{ t("app.subtitle") }</p>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn header_shows_title_and_subtitle() {
        let html = block_on(LocalServerRenderer::<Header>::new().render());
        assert!(html.contains("Trackmania Map Randomizer"));
        assert!(html.contains("Discover random Trackmania maps"));
        assert!(html.contains("href=\"#main\""));
    }
}
