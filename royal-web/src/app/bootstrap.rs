use crate::app::session::{SelectionState, SessionAction};
use crate::app::state::AppState;
use crate::data::{create_web_engine, entropy_seed};
use yew::prelude::*;

#[derive(Clone)]
struct BootstrapHandles {
    selection: UseReducerHandle<SelectionState>,
    load_failed: UseStateHandle<bool>,
    boot_ready: UseStateHandle<bool>,
}

fn handles_from_state(app_state: &AppState) -> BootstrapHandles {
    BootstrapHandles {
        selection: app_state.selection.clone(),
        load_failed: app_state.load_failed.clone(),
        boot_ready: app_state.boot_ready.clone(),
    }
}

fn bootstrap_load(handles: &BootstrapHandles, seed: u64) {
    let boot = create_web_engine().create_session(seed);
    for err in &boot.errors {
        log::error!("Failed to load map history: {err}");
    }
    let catalog_len = boot.session.catalog().len();
    log::info!("Loaded {catalog_len} maps (seed {seed})");
    handles.load_failed.set(catalog_len == 0 && !boot.is_clean());
    handles.selection.dispatch(SessionAction::Loaded(boot.session));
    handles.boot_ready.set(true);
}

#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let handles = handles_from_state(app_state);

    use_effect_with((), move |()| {
        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            bootstrap_load(&handles, entropy_seed());
        });
        #[cfg(not(target_arch = "wasm32"))]
        bootstrap_load(&handles, entropy_seed());
        || {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[function_component(BootstrapHarness)]
    fn bootstrap_harness() -> Html {
        let app_state = crate::app::state::use_app_state();
        let handles = handles_from_state(&app_state);
        let initialized = use_state(|| false);
        if !*initialized {
            initialized.set(true);
            bootstrap_load(&handles, 11);
        }
        Html::default()
    }

    #[test]
    fn bootstrap_loads_assets_for_tests() {
        let _ = block_on(LocalServerRenderer::<BootstrapHarness>::new().render());
    }
}
