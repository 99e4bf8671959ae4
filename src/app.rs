use dioxus::prelude::*;

use crate::components::NavMenu;
use crate::context::{get_data_dir, open_flow, SharedFlow};
use crate::pages::LetterPage;
use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Provides global styles and the flow context, then renders the letter page.
#[component]
pub fn App() -> Element {
    let flow: SharedFlow = use_signal(|| {
        let data_dir = get_data_dir();
        match open_flow(&data_dir) {
            Ok(mut flow) => {
                flow.open(crate::get_entry_point());
                tracing::info!("Letter flow ready ({} letters buried)", flow.store().len());
                Some(flow)
            }
            Err(e) => {
                tracing::error!("Failed to open archive in {:?}: {}", data_dir, e);
                None
            }
        }
    });

    use_context_provider(|| flow);

    rsx! {
        style { {GLOBAL_STYLES} }
        NavMenu {}
        LetterPage {}
    }
}
