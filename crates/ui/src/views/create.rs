use std::sync::Arc;

use dioxus::prelude::*;

use crate::context::{AppContext, RefreshKey};
use crate::views::ViewError;
use crate::vm::{CreateVm, SaveState};

#[component]
pub fn CreateCardForm() -> Element {
    let ctx = use_context::<AppContext>();
    let refresh = use_context::<RefreshKey>();
    let mut vm = use_signal(CreateVm::new);

    let api = ctx.cards();
    let submit = use_callback(move |_: ()| {
        let Some(content) = vm.write().start_submit() else {
            return;
        };
        let api = Arc::clone(&api);
        spawn(async move {
            let result = api.create_card(&content).await;
            if vm.write().finish_submit(result) {
                refresh.bump();
            }
        });
    });

    let front = vm.read().front().to_owned();
    let back = vm.read().back().to_owned();
    let can_submit = vm.read().can_submit();
    let state = vm.read().state();
    let button_label = if state == SaveState::Saving {
        "Creating…"
    } else {
        "Add Card"
    };
    let status = match state {
        SaveState::Success => Some(("status-ok", "Card created.")),
        SaveState::Error(_) => Some(("error", ViewError::Api.message())),
        _ => None,
    };

    rsx! {
        div { class: "panel create-form",
            label { r#for: "create-front", "Front (Question)" }
            input {
                id: "create-front",
                placeholder: "e.g. What is spaced repetition?",
                value: "{front}",
                oninput: move |evt| vm.write().set_front(evt.value()),
            }

            label { r#for: "create-back", "Back (Answer)" }
            textarea {
                id: "create-back",
                rows: "3",
                placeholder: "e.g. A learning technique that reviews material at increasing intervals.",
                value: "{back}",
                oninput: move |evt| vm.write().set_back(evt.value()),
            }

            button {
                class: "primary",
                disabled: !can_submit,
                onclick: move |_| submit.call(()),
                "{button_label}"
            }

            if let Some((class, message)) = status {
                p { class: "{class}", "{message}" }
            }
        }
    }
}
