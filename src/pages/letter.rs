//! Letter page - the whole write / send / bury flow on one screen.
//!
//! Only the active step is rendered. Delayed transitions (the "sending"
//! screens) are applied by a spawned task once their delay has passed.

use chrono::Local;
use dioxus::prelude::*;
use ripmind_core::{
    Destination, FlowDraft, LetterDetail, LetterRecord, ListRow, Step, ValidationError,
};

use crate::components::{LetterDetailModal, LetterListView};
use crate::context::{schedule_pending, update_flow, use_flow, SharedFlow};

/// Everything the page renders, copied out of the flow.
struct PageView {
    active: Option<Step>,
    draft: FlowDraft,
    phone_visible: bool,
    alert: Option<ValidationError>,
    rows: Vec<ListRow>,
    selected: Option<usize>,
    detail: Option<LetterDetail>,
    wall: Vec<LetterRecord>,
    restart_available: bool,
}

/// Letter page component.
#[component]
pub fn LetterPage() -> Element {
    let flow = use_flow();

    let view = {
        let guard = flow.read();
        let Some(state) = guard.as_ref() else {
            return rsx! {
                main { class: "letter-page",
                    p { class: "startup-error",
                        "The archive could not be opened. See the log for details."
                    }
                }
            };
        };
        PageView {
            active: state.active_step(),
            draft: state.draft().clone(),
            phone_visible: state.phone_field_visible(),
            alert: state.alert(),
            rows: state.list().rows().to_vec(),
            selected: state.list().selected_index(),
            detail: state.list().detail().cloned(),
            wall: state.wall().to_vec(),
            restart_available: state.restart_available(),
        }
    };

    let step_id = view.active.map(|s| s.id()).unwrap_or_default();

    rsx! {
        main { class: "letter-page",
            section { class: "step", id: "{step_id}",
                {render_step(flow, &view)}
            }

            if let Some(detail) = view.detail.clone() {
                LetterDetailModal {
                    detail,
                    on_close: move |_| {
                        update_flow(flow, |f| f.list_mut().close_detail());
                    },
                }
            }

            if let Some(alert) = view.alert {
                div { class: "alert-overlay",
                    div { class: "alert-card",
                        p { "{alert}" }
                        button {
                            class: "btn-primary",
                            onclick: move |_| {
                                update_flow(flow, |f| f.dismiss_alert());
                            },
                            "OK"
                        }
                    }
                }
            }
        }
    }
}

fn submit(flow: SharedFlow, destination: Destination) {
    let pending = update_flow(flow, |f| f.submit(destination).pending).flatten();
    if let Some(pending) = pending {
        schedule_pending(flow, pending);
    }
}

fn render_step(flow: SharedFlow, view: &PageView) -> Element {
    let Some(step) = view.active else {
        return rsx! {};
    };

    match step {
        Step::Consent => rsx! {
            h2 { class: "step-title", "Would you like to leave your phone number?" }
            p { class: "step-text",
                "If you send your letter live, we can text it to you."
            }
            div { class: "step-actions",
                button {
                    class: "btn-secondary",
                    onclick: move |_| {
                        update_flow(flow, |f| f.set_consent(false));
                    },
                    "No thanks"
                }
                button {
                    class: "btn-primary",
                    onclick: move |_| {
                        update_flow(flow, |f| f.set_consent(true));
                    },
                    "Yes"
                }
            }
        },

        Step::Identity => {
            let nickname = view.draft.nickname().to_string();
            let phone = view.draft.phone().to_string();
            let acknowledged = view.draft.acknowledged();
            let counter = view.draft.nickname_counter();

            rsx! {
                h2 { class: "step-title", "Who is writing?" }
                div { class: "form-group",
                    label { class: "form-label", "Nickname " span { class: "counter", "{counter}" } }
                    input {
                        class: "form-input",
                        r#type: "text",
                        maxlength: "6",
                        value: "{nickname}",
                        oninput: move |e| {
                            update_flow(flow, |f| f.draft_mut().set_nickname(&e.value()));
                        },
                        placeholder: "nickname",
                        autofocus: true,
                    }
                }

                if view.phone_visible {
                    div { class: "form-group",
                        label { class: "form-label", "Phone number" }
                        input {
                            class: "form-input",
                            r#type: "tel",
                            value: "{phone}",
                            oninput: move |e| {
                                update_flow(flow, |f| f.draft_mut().set_phone(&e.value()));
                            },
                            placeholder: "010-0000-0000",
                        }
                    }
                    label { class: "form-check",
                        input {
                            r#type: "checkbox",
                            checked: acknowledged,
                            onchange: move |e| {
                                update_flow(flow, |f| f.draft_mut().set_acknowledged(e.checked()));
                            },
                        }
                        " I agree to the collection and use of personal information."
                    }
                }

                div { class: "step-actions",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| {
                            update_flow(flow, |f| f.go_back(Step::Consent));
                        },
                        "Back"
                    }
                    button {
                        class: "btn-primary",
                        onclick: move |_| {
                            let _ = update_flow(flow, |f| f.validate_before_content());
                        },
                        "Next"
                    }
                }
            }
        }

        Step::Content => {
            let content = view.draft.content().to_string();

            rsx! {
                h2 { class: "step-title", "Write your letter" }
                textarea {
                    class: "letter-input",
                    value: "{content}",
                    oninput: move |e| {
                        update_flow(flow, |f| f.draft_mut().set_content(&e.value()));
                    },
                    placeholder: "Dear...",
                    autofocus: true,
                }
                div { class: "step-actions",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| {
                            update_flow(flow, |f| f.go_back(Step::Identity));
                        },
                        "Back"
                    }
                    button {
                        class: "btn-ghost",
                        onclick: move |_| {
                            update_flow(flow, |f| f.draft_mut().clear_content());
                        },
                        "Erase all"
                    }
                    button {
                        class: "btn-primary",
                        onclick: move |_| {
                            update_flow(flow, |f| f.finish_content());
                        },
                        "Done"
                    }
                }
            }
        }

        Step::Choice => rsx! {
            h2 { class: "step-title", "What should happen to your letter?" }
            div { class: "choice-actions",
                button {
                    class: "btn-choice",
                    onclick: move |_| submit(flow, Destination::Live),
                    "Send it now"
                }
                button {
                    class: "btn-choice",
                    onclick: move |_| submit(flow, Destination::Archive),
                    "Bury it in RIP MIND"
                }
            }
            div { class: "step-actions",
                button {
                    class: "btn-secondary",
                    onclick: move |_| {
                        update_flow(flow, |f| f.go_back(Step::Content));
                    },
                    "Back"
                }
            }
        },

        Step::SendingLive => rsx! {
            p { class: "step-sending", "Sending your letter..." }
        },

        Step::SendingArchive => rsx! {
            p { class: "step-sending", "Burying your letter..." }
        },

        Step::LiveComplete => rsx! {
            h2 { class: "step-title", "Your letter has been sent." }
            {restart_button(flow, true)}
        },

        Step::Archive => {
            let rows = view.rows.clone();

            rsx! {
                h2 { class: "step-title", "RIP MIND" }
                LetterListView {
                    rows,
                    selected: view.selected,
                    on_select: move |index: usize| {
                        update_flow(flow, |f| {
                            f.list_mut().select(index);
                        });
                    },
                }
                {restart_button(flow, view.restart_available)}
            }
        }

        Step::LiveWall => rsx! {
            h2 { class: "step-title", "Live letters" }
            ul { class: "wall",
                for record in view.wall.iter() {
                    li { key: "{record.id}", class: "wall-entry",
                        div { class: "wall-header",
                            span { class: "letter-nickname", "{record.nickname}" }
                            span { class: "letter-time", "{record.formatted_time(&Local)}" }
                        }
                        p { class: "wall-content", "{record.content}" }
                    }
                }
            }
            {restart_button(flow, true)}
        },
    }
}

fn restart_button(flow: SharedFlow, visible: bool) -> Element {
    if !visible {
        return rsx! {};
    }

    rsx! {
        div { class: "step-actions",
            button {
                class: "btn-primary",
                onclick: move |_| {
                    update_flow(flow, |f| f.restart());
                },
                "Write another letter"
            }
        }
    }
}
