//! Archive list and letter detail components.
//!
//! - [`LetterListView`] - Rows of buried letters, newest first
//! - [`LetterDetailModal`] - The selected letter in full

use dioxus::prelude::*;
use ripmind_core::{LetterDetail, ListRow};

/// Archive rows with a single highlighted selection.
///
/// # Props
///
/// * `rows` - Rows from the list projection (a lone placeholder when empty)
/// * `selected` - Index of the highlighted row
/// * `on_select` - Called with the row index when a letter is clicked
#[component]
pub fn LetterListView(
    rows: Vec<ListRow>,
    selected: Option<usize>,
    on_select: EventHandler<usize>,
) -> Element {
    rsx! {
        ul { class: "letter-list",
            for (index, row) in rows.into_iter().enumerate() {
                {match row {
                    ListRow::Letter { id, nickname, time_label } => rsx! {
                        li {
                            key: "{id}",
                            class: if selected == Some(index) { "letter-row selected" } else { "letter-row" },
                            onclick: move |_| on_select.call(index),
                            span { class: "letter-nickname", "{nickname}" }
                            span { class: "letter-time", "{time_label}" }
                        }
                    },
                    ListRow::Placeholder(text) => rsx! {
                        li { class: "letter-row placeholder", "{text}" }
                    },
                }}
            }
        }
    }
}

/// Full view of one letter.
///
/// Closed by the close button, a click on the overlay, or Escape.
#[component]
pub fn LetterDetailModal(detail: LetterDetail, on_close: EventHandler<()>) -> Element {
    let on_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Escape {
            on_close.call(());
        }
    };

    rsx! {
        div {
            class: "detail-overlay",
            tabindex: "0",
            autofocus: true,
            onclick: move |_| on_close.call(()),
            onkeydown: on_keydown,

            article {
                class: "detail-card",
                onclick: move |e| e.stop_propagation(),

                button {
                    class: "detail-close",
                    onclick: move |_| on_close.call(()),
                    "aria-label": "Close",
                    "×"
                }
                h2 { class: "detail-title", "{detail.title}" }
                p { class: "detail-since", "{detail.since}" }
                p { class: "detail-content", "{detail.content}" }
            }
        }
    }
}
