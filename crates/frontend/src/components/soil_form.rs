use cropmap_shared::soil::{SoilField, SoilForm};
use dioxus::prelude::*;

/// Overlay card with the five soil inputs. Every keystroke updates `soil`;
/// the values are never cleared.
#[component]
pub fn SoilFormCard(mut soil: Signal<SoilForm>, on_submit: EventHandler<()>) -> Element {
    rsx! {
        div { class: "card form-card",
            div { class: "card-header",
                h3 { class: "card-title", "Crop Recommendation" }
                p { class: "card-description", "Fill in the soil details below" }
            }
            div { class: "card-content",
                form {
                    onsubmit: move |evt: Event<FormData>| {
                        evt.prevent_default();
                        on_submit.call(());
                    },
                    for field in SoilField::ALL {
                        input {
                            class: "form-input",
                            r#type: "number",
                            name: field.name(),
                            step: field.step(),
                            placeholder: field.placeholder(),
                            required: true,
                            value: "{soil.read().get(field)}",
                            oninput: move |evt: Event<FormData>| {
                                soil.write().set(field, evt.value());
                            },
                        }
                    }
                    button { r#type: "submit", class: "btn-primary", "Submit" }
                }
            }
        }
    }
}
