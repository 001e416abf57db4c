#![cfg(target_arch = "wasm32")]

use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use yew::Renderer;

use royal_web::app::App;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
}

fn ensure_app_root() -> web_sys::Element {
    let doc = document();
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn settle() {
    // Let the bootstrap effect and the re-render it triggers run.
    yew::platform::time::sleep(Duration::from_millis(50)).await;
}

fn click(selector: &str) {
    document()
        .query_selector(selector)
        .expect("query")
        .expect("element exists")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

#[wasm_bindgen_test]
async fn reroll_fills_the_list() {
    royal_web::i18n::set_lang("en");
    Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;

    assert!(document().query_selector(".empty-state").unwrap().is_some());
    click("#reroll-all-btn");
    settle().await;

    let rows = document().query_selector_all(".map-row").unwrap();
    assert_eq!(rows.length(), 5);
    let live = document()
        .get_element_by_id("randomizer-status")
        .expect("live region");
    assert_eq!(live.text_content().unwrap_or_default(), "Drew 5 maps");
}

#[wasm_bindgen_test]
async fn filter_dialog_opens_and_saves() {
    royal_web::i18n::set_lang("en");
    Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;

    click("#filter-open-btn");
    settle().await;
    assert!(document().query_selector("[role='dialog']").unwrap().is_some());

    click("#year-2021");
    settle().await;
    click(".modal__actions .btn-primary");
    settle().await;

    assert!(document().query_selector("[role='dialog']").unwrap().is_none());
    let filter_btn = document().get_element_by_id("filter-open-btn").unwrap();
    assert!(filter_btn.text_content().unwrap_or_default().contains("(4)"));
}
