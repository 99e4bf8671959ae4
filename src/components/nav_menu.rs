//! Hamburger navigation menu.

use dioxus::prelude::*;
use ripmind_core::Step;

use crate::context::{update_flow, use_flow};

/// Open/closed state of the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Menu toggle plus its drawer.
///
/// Every item closes the drawer after navigating.
#[component]
pub fn NavMenu() -> Element {
    let flow = use_flow();
    let mut menu = use_signal(MenuState::default);

    let write_letter = move |_| {
        update_flow(flow, |f| f.restart());
        menu.write().close();
    };

    let browse = move |_| {
        update_flow(flow, |f| f.go_to(Step::Archive));
        menu.write().close();
    };

    let open = menu.read().is_open();

    rsx! {
        header { class: "nav-header",
            span { class: "nav-title", "RIP MIND" }
            button {
                class: if open { "nav-toggle open" } else { "nav-toggle" },
                "aria-label": "Menu",
                "aria-expanded": "{open}",
                onclick: move |_| menu.write().toggle(),
                span {}
                span {}
                span {}
            }
        }

        if open {
            div {
                class: "nav-overlay",
                onclick: move |_| menu.write().close(),

                nav {
                    class: "nav-drawer",
                    onclick: move |e| e.stop_propagation(),
                    button { class: "nav-item", onclick: write_letter, "Write a letter" }
                    button { class: "nav-item", onclick: browse, "RIP MIND" }
                }
            }
        }
    }
}
