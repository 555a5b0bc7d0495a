use std::sync::Arc;

use dioxus::prelude::*;

use recall_core::{Card, CardId, SortConfig, SortDirection, SortKey};

use crate::context::{AppContext, RefreshKey};
use crate::views::{ViewError, ViewState};
use crate::vm::{CollectionVm, EditDraft, EditVm, format_timestamp};

struct RowData {
    key: String,
    card: Card,
    draft: Option<EditDraft>,
    deleting: bool,
}

#[component]
pub fn ManageView() -> Element {
    let ctx = use_context::<AppContext>();
    let refresh = use_context::<RefreshKey>();
    let mut collection = use_signal(CollectionVm::new);
    let mut edit = use_signal(EditVm::new);

    let api_for_reload = ctx.cards();
    let reload = use_callback(move |_: ()| {
        let api = Arc::clone(&api_for_reload);
        let pending = collection.write().start_load();
        spawn(async move {
            let result = api.list_cards(&pending.params).await;
            collection.write().finish_load(pending.generation, result);
        });
    });

    // Load on mount and whenever data changes anywhere in the app.
    use_effect(move || {
        let _ = refresh.subscribe();
        reload.call(());
    });

    let on_sort = use_callback(move |key: SortKey| {
        collection.write().toggle_sort(key);
        reload.call(());
    });

    let on_search = use_callback(move |value: String| {
        collection.write().set_search(value);
        reload.call(());
    });

    let on_prev = use_callback(move |_: ()| {
        if collection.write().prev_page() {
            reload.call(());
        }
    });

    let on_next = use_callback(move |_: ()| {
        if collection.write().next_page() {
            reload.call(());
        }
    });

    let on_edit = use_callback(move |card: Card| edit.write().begin_edit(&card));
    let on_cancel = use_callback(move |_: ()| edit.write().cancel_edit());
    let on_front = use_callback(move |value: String| edit.write().set_front(value));
    let on_back = use_callback(move |value: String| edit.write().set_back(value));

    let api_for_save = ctx.cards();
    let on_save = use_callback(move |_: ()| {
        let Some(pending) = edit.write().start_save() else {
            return;
        };
        let api = Arc::clone(&api_for_save);
        spawn(async move {
            let result = api.update_card(&pending.card_id, &pending.content).await;
            if edit.write().finish_save(&pending.card_id, result) {
                // Reload authoritative content instead of patching the row.
                refresh.bump();
            }
        });
    });

    let api_for_delete = ctx.cards();
    let on_delete = use_callback(move |id: CardId| {
        if !edit.write().start_delete(&id) {
            return;
        }
        let api = Arc::clone(&api_for_delete);
        spawn(async move {
            let result = api.delete_card(&id).await;
            if edit.write().finish_delete(&id, result) {
                refresh.bump();
            }
        });
    });

    let state = collection.read().state().clone();
    let sort = collection.read().sort();
    let search = collection.read().search().to_owned();
    let banner_message = edit.read().last_error().map(ViewError::message);

    let panel = match &state {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "panel panel-center",
                p { class: "muted", "Loading cards…" }
            }
        },
        ViewState::Error(err) => {
            let message = err.message();
            rsx! {
                div { class: "panel panel-center panel-error",
                    p { class: "error", "{message}" }
                    p { class: "muted", "Make sure the backend is running." }
                    button { class: "secondary", onclick: move |_| reload.call(()), "Retry" }
                }
            }
        }
        ViewState::Ready(page) if page.is_empty() => rsx! {
            div { class: "panel panel-center",
                p { class: "panel-title", "No cards yet" }
                p { class: "muted", "Create some cards in the Review tab to get started." }
            }
        },
        ViewState::Ready(page) => {
            let rows: Vec<RowData> = {
                let edit_state = edit.read();
                page.content
                    .iter()
                    .map(|card| RowData {
                        key: card.id().to_string(),
                        card: card.clone(),
                        draft: edit_state
                            .draft()
                            .filter(|draft| draft.card_id() == card.id())
                            .cloned(),
                        deleting: edit_state.is_deleting(card.id()),
                    })
                    .collect()
            };
            let can_save = edit.read().can_save();
            let page_label = format!(
                "Page {} of {} · {} cards",
                page.page + 1,
                page.total_pages.max(1),
                page.total_elements
            );
            let at_first = page.page == 0;
            let at_last = page.last;
            rsx! {
                table { class: "card-table",
                    thead {
                        tr {
                            th { SortHeader { label: "Front", sort_key: SortKey::Front, sort, on_sort } }
                            th { SortHeader { label: "Back", sort_key: SortKey::Back, sort, on_sort } }
                            th { SortHeader { label: "Next Review", sort_key: SortKey::NextReview, sort, on_sort } }
                            th { class: "actions", "Actions" }
                        }
                    }
                    tbody {
                        for row in rows {
                            CardRow {
                                key: "{row.key}",
                                card: row.card.clone(),
                                draft: row.draft.clone(),
                                can_save,
                                deleting: row.deleting,
                                on_edit,
                                on_cancel,
                                on_save,
                                on_delete,
                                on_front,
                                on_back,
                            }
                        }
                    }
                }
                div { class: "pager",
                    button { class: "secondary", disabled: at_first, onclick: move |_| on_prev.call(()), "Previous" }
                    span { class: "muted", "{page_label}" }
                    button { class: "secondary", disabled: at_last, onclick: move |_| on_next.call(()), "Next" }
                }
            }
        }
    };

    rsx! {
        section { class: "manage",
            div { class: "manage-topbar",
                h2 { "All Cards" }
                input {
                    class: "search",
                    r#type: "search",
                    placeholder: "Search front or back",
                    value: "{search}",
                    oninput: move |evt| on_search.call(evt.value()),
                }
            }

            if let Some(message) = banner_message {
                div { class: "banner banner-error",
                    span { "{message}" }
                    button {
                        class: "banner-dismiss",
                        onclick: move |_| edit.write().dismiss_error(),
                        "Dismiss"
                    }
                }
            }

            {panel}
        }
    }
}

#[component]
fn SortHeader(
    label: &'static str,
    sort_key: SortKey,
    sort: SortConfig,
    on_sort: Callback<SortKey>,
) -> Element {
    let indicator = if sort.key == sort_key {
        match sort.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    } else {
        ""
    };
    rsx! {
        button {
            class: "sort-header",
            onclick: move |_| on_sort.call(sort_key),
            "{label}{indicator}"
        }
    }
}

#[component]
fn CardRow(
    card: Card,
    draft: Option<EditDraft>,
    can_save: bool,
    deleting: bool,
    on_edit: Callback<Card>,
    on_cancel: Callback<()>,
    on_save: Callback<()>,
    on_delete: Callback<CardId>,
    on_front: Callback<String>,
    on_back: Callback<String>,
) -> Element {
    let next_review = format_timestamp(card.next_review_at());

    if let Some(draft) = draft {
        let front = draft.front().to_owned();
        let back = draft.back().to_owned();
        let saving = draft.is_saving();
        let error_message = draft.error().map(ViewError::message);
        rsx! {
            tr { class: "editing",
                td {
                    input {
                        value: "{front}",
                        oninput: move |evt| on_front.call(evt.value()),
                    }
                }
                td {
                    input {
                        value: "{back}",
                        oninput: move |evt| on_back.call(evt.value()),
                    }
                }
                td {
                    // The review date is not editable; show it dimmed.
                    span { class: "muted", "{next_review}" }
                }
                td { class: "actions",
                    button {
                        class: "primary",
                        disabled: !can_save || saving,
                        onclick: move |_| on_save.call(()),
                        "Save"
                    }
                    button { class: "secondary", onclick: move |_| on_cancel.call(()), "Cancel" }
                    if let Some(message) = error_message {
                        span { class: "error", "{message}" }
                    }
                }
            }
        }
    } else {
        let front = card.front().to_owned();
        let back = card.back().to_owned();
        let card_for_edit = card.clone();
        let id_for_delete = card.id().clone();
        rsx! {
            tr {
                td { class: "truncate", "{front}" }
                td { class: "truncate muted", "{back}" }
                td { class: "muted", "{next_review}" }
                td { class: "actions",
                    button {
                        class: "secondary",
                        onclick: move |_| on_edit.call(card_for_edit.clone()),
                        "Edit"
                    }
                    button {
                        class: "danger",
                        disabled: deleting,
                        onclick: move |_| on_delete.call(id_for_delete.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
