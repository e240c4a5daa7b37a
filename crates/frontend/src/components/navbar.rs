use dioxus::prelude::*;

use crate::Route;

const LOGO: Asset = asset!("/assets/favicon.svg");

/// Label and path of every navbar link, in display order.
pub const NAV_LINKS: [(&str, &str); 5] = [
    ("Home", "/"),
    ("Map", "/map"),
    ("About", "/about"),
    ("Resources", "/resources"),
    ("Contact us", "/contact"),
];

/// The link for the current route is highlighted, the rest are muted.
pub fn link_class(current_path: &str, href: &str) -> &'static str {
    if current_path == href {
        "nav-link active"
    } else {
        "nav-link"
    }
}

#[component]
pub fn Navbar() -> Element {
    let route = use_route::<Route>();
    let current = route.to_string();
    let mut menu_open = use_signal(|| false);
    let open = *menu_open.read();

    rsx! {
        header { class: "navbar",
            nav { class: "nav-desktop",
                Link { to: Route::Home {}, class: "nav-brand",
                    img { src: LOGO, class: "nav-logo", alt: "Crop Map logo" }
                    span { "Crop Map" }
                }
                for (label, href) in NAV_LINKS {
                    Link { to: href, class: link_class(&current, href), "{label}" }
                }
            }

            button {
                class: "nav-toggle",
                "aria-label": "Toggle navigation menu",
                onclick: move |_| menu_open.set(!open),
                "\u{2630}"
            }

            div { class: "nav-auth",
                Link { to: "/auth/signup", class: "btn-outline", "Sign Up" }
                Link { to: "/auth/login", class: "btn-outline", "Sign In" }
            }
        }

        if open {
            div {
                class: "nav-sheet-backdrop",
                onclick: move |_| menu_open.set(false),

                nav {
                    class: "nav-sheet",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                    for (label, href) in NAV_LINKS {
                        Link {
                            to: href,
                            class: link_class(&current, href),
                            onclick: move |_| menu_open.set(false),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
