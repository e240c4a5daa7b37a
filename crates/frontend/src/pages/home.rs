use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "hero",
            h1 { "Find the right crop for your field" }
            p { class: "hero-text",
                "Share your location, enter the nitrogen, phosphorus and potassium levels, "
                "the soil pH and the expected rainfall, and get a crop recommendation "
                "based on your soil and today's weather."
            }
            Link { to: Route::MapDisplay {}, class: "btn-primary", "Open the map" }
        }
    }
}
