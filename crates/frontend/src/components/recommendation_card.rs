use cropmap_shared::models::CropRecommendation;
use dioxus::prelude::*;

/// Lines rendered under the crop name, taken from the weather echo.
pub fn recommendation_lines(rec: &CropRecommendation) -> [String; 2] {
    [
        format!("Temperature: {}\u{00b0}C", rec.weather_data.temperature),
        format!("Humidity: {}%", rec.weather_data.humidity),
    ]
}

/// The soil values the service echoed back, when it sent them.
pub fn soil_summary(rec: &CropRecommendation) -> Option<String> {
    rec.input_data.map(|soil| {
        format!(
            "N {} \u{00b7} P {} \u{00b7} K {} \u{00b7} pH {} \u{00b7} Rainfall {} mm",
            soil.n, soil.p, soil.k, soil.ph, soil.rainfall
        )
    })
}

#[component]
pub fn RecommendationCard(recommendation: CropRecommendation) -> Element {
    let lines = recommendation_lines(&recommendation);
    let soil = soil_summary(&recommendation);

    rsx! {
        div { class: "card recommendation-card",
            div { class: "card-header",
                h3 { class: "card-title", "Recommended Crop" }
            }
            div { class: "card-content recommendation-body",
                if !recommendation.crop_image_url.is_empty() {
                    img {
                        class: "crop-image",
                        src: "{recommendation.crop_image_url}",
                        alt: "{recommendation.recommended_crop}",
                    }
                }
                p { class: "crop-name", "{recommendation.recommended_crop}" }
                for line in lines {
                    p { "{line}" }
                }
                if let Some(soil) = soil {
                    p { class: "soil-echo", "{soil}" }
                }
            }
        }
    }
}
