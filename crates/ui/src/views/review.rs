use std::sync::Arc;

use dioxus::prelude::*;

use recall_core::Quality;

use crate::context::{AppContext, RefreshKey};
use crate::views::CreateCardForm;
use crate::vm::{ReviewPhase, ReviewState, ReviewVm};

#[component]
pub fn ReviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let refresh = use_context::<RefreshKey>();
    let mut vm = use_signal(ReviewVm::new);

    let api_for_reload = ctx.cards();
    let reload = use_callback(move |_: ()| {
        let api = Arc::clone(&api_for_reload);
        let pending = vm.write().start_refresh();
        spawn(async move {
            let result = api.list_due_cards().await;
            vm.write().finish_refresh(pending.generation, result);
        });
    });

    // Load on mount and whenever data changes anywhere in the app.
    use_effect(move || {
        let _ = refresh.subscribe();
        reload.call(());
    });

    let api_for_rate = ctx.cards();
    let rate = use_callback(move |quality: Quality| {
        let Some(pending) = vm.write().start_rating(quality) else {
            return;
        };
        let api = Arc::clone(&api_for_rate);
        spawn(async move {
            match api.review_card(&pending.card_id, pending.quality).await {
                // The due list (and the collection) reload through the shared
                // refresh key; the next card is whatever the service returns.
                Ok(_) => refresh.bump(),
                Err(_) => vm.write().finish_rating_failure(&pending),
            }
        });
    });

    let state = vm.read().state().clone();
    let due_count = vm.read().due_count();
    let status_label = match &state {
        ReviewState::Loading => "Loading…",
        ReviewState::Failed(_) => "Unavailable",
        ReviewState::Empty => "All caught up",
        ReviewState::Active(_) => "Cards to review",
    };
    let next_up = vm
        .read()
        .current_card()
        .map_or_else(|| "No cards".to_owned(), |card| card.front().to_owned());

    let panel = match &state {
        ReviewState::Loading => rsx! {
            div { class: "panel panel-center",
                p { class: "muted", "Loading due cards…" }
            }
        },
        ReviewState::Failed(err) => {
            let message = err.message();
            rsx! {
                div { class: "panel panel-center panel-error",
                    p { class: "error", "{message}" }
                    p { class: "muted", "Make sure the backend is running." }
                    button { class: "secondary", onclick: move |_| reload.call(()), "Retry" }
                }
            }
        }
        ReviewState::Empty => rsx! {
            div { class: "panel panel-center",
                p { class: "panel-title", "No cards due for review" }
                p { class: "muted", "Create new cards or check back later." }
            }
        },
        ReviewState::Active(active) => {
            let front = active.card().front().to_owned();
            let back = active.card().back().to_owned();
            let revealed = active.phase() == ReviewPhase::Answer;
            let submitting = active.is_submitting();
            let error_message = active.error().map(crate::views::ViewError::message);
            rsx! {
                div { class: "panel review-card",
                    if revealed {
                        p { class: "card-face card-back", "{back}" }
                        p { class: "muted", "Answer" }
                    } else {
                        p { class: "card-face card-front", "{front}" }
                        p { class: "muted", "Click flip to reveal the answer" }
                    }

                    if revealed {
                        div { class: "ratings",
                            for quality in Quality::ALL {
                                RatingButton { quality, submitting, on_rate: rate }
                            }
                        }
                    } else {
                        button {
                            class: "secondary",
                            onclick: move |_| {
                                vm.write().reveal();
                            },
                            "Flip Card"
                        }
                    }

                    if let Some(message) = error_message {
                        p { class: "error", "{message}" }
                    }
                }
            }
        }
    };

    rsx! {
        section { class: "review",
            div { class: "stats-row",
                div { class: "stat",
                    span { class: "stat-label", "Cards due" }
                    span { class: "stat-value", "{due_count}" }
                }
                div { class: "stat",
                    span { class: "stat-label", "Status" }
                    span { class: "stat-value", "{status_label}" }
                }
                div { class: "stat",
                    span { class: "stat-label", "Next up" }
                    span { class: "stat-value stat-truncate", "{next_up}" }
                }
            }

            div { class: "review-columns",
                div { class: "review-main",
                    h2 { "Review" }
                    {panel}
                }
                div { class: "review-side",
                    h2 { "Add Cards" }
                    CreateCardForm {}
                }
            }
        }
    }
}

#[component]
fn RatingButton(quality: Quality, submitting: bool, on_rate: Callback<Quality>) -> Element {
    let label = quality.label();
    rsx! {
        button {
            class: "rate",
            disabled: submitting,
            onclick: move |_| on_rate.call(quality),
            "{label}"
        }
    }
}
