use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::Route;

/// Shell for the content pages: navbar on top, routed page below.
#[component]
pub fn MainLayout() -> Element {
    rsx! {
        Navbar {}
        main { class: "page",
            Outlet::<Route> {}
        }
    }
}
