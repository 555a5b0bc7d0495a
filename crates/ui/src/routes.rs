use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{ManageView, ReviewView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ReviewView)] Review {},
        #[route("/cards", ManageView)] Manage {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Recall" }
            p { class: "tagline", "Spaced repetition dashboard" }
            ul {
                li { Link { to: Route::Review {}, "Review" } }
                li { Link { to: Route::Manage {}, "Manage Cards" } }
            }
        }
    }
}
