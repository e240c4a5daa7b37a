mod api;
mod components;
mod geolocation;
mod pages;
mod viewport;

use dioxus::prelude::*;

use components::layout::MainLayout;
use pages::home::Home;
use pages::map_display::MapDisplay;
use pages::not_found::PageNotFound;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
enum Route {
    #[route("/map")]
    MapDisplay {},
    #[layout(MainLayout)]
        #[route("/")]
        Home {},
        #[route("/:..segments")]
        PageNotFound { segments: Vec<String> },
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
