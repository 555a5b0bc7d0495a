use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::RefreshKey;
use crate::routes::Route;

static STYLESHEET: &str = include_str!("../assets/style.css");

#[component]
pub fn App() -> Element {
    // The "data changed" channel lives at the root so every view shares it.
    let refresh = use_signal(|| 0u64);
    use_context_provider(|| RefreshKey(refresh));

    rsx! {
        document::Title { "Recall" }
        style { {STYLESHEET} }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
