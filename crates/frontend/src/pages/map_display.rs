use cropmap_shared::models::{ClientConfig, CropRecommendation, Location, Weather};
use cropmap_shared::soil::SoilForm;
use dioxus::prelude::*;
use reqwest::Url;

use crate::api::{self, ApiError};
use crate::components::map_view::MapView;
use crate::components::recommendation_card::RecommendationCard;
use crate::components::soil_form::SoilFormCard;
use crate::components::weather_card::WeatherCard;
use crate::geolocation;
use crate::viewport::MapViewport;

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

/// Put the position overlay on the map and build the weather request for
/// the resolved position.
fn on_located(view: &mut MapViewport, config: &ClientConfig, here: Location) -> Result<Url, ApiError> {
    view.locate(here, config.marker_radius_m);
    api::weather_url(config, here)
}

#[component]
pub fn MapDisplay() -> Element {
    let mut config = use_signal(ClientConfig::default);
    let mut view = use_signal(MapViewport::default);
    let mut location = use_signal(|| None::<Location>);
    let mut weather = use_signal(|| None::<Weather>);
    let soil = use_signal(SoilForm::default);
    let mut recommendation = use_signal(|| None::<CropRecommendation>);

    // Runs once per mount. The position request starts before the config
    // fetch so a slow config endpoint never delays the permission prompt.
    use_future(move || async move {
        let position = geolocation::current_position();

        let cfg = match api::fetch_config().await {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Using default client config: {}", e);
                ClientConfig::default()
            }
        };
        config.set(cfg.clone());

        let here = match position.await {
            Ok(here) => here,
            Err(e) => {
                tracing::error!("Error fetching geolocation: {}", e);
                return;
            }
        };
        location.set(Some(here));
        let url = match on_located(&mut view.write(), &cfg, here) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Error fetching weather: {}", e);
                return;
            }
        };

        match api::fetch_weather(url).await {
            Ok(w) => {
                tracing::debug!(location = %w.location, "Weather loaded");
                weather.set(Some(w));
            }
            Err(e) => tracing::warn!("Error fetching weather: {}", e),
        }
    });

    let on_submit = move |_| {
        let request = match soil.read().to_request(*location.read()) {
            Ok(request) => request,
            Err(e) => {
                alert(&e.to_string());
                return;
            }
        };
        let cfg = config.read().clone();
        spawn(async move {
            match api::recommend_crop(&cfg, &request).await {
                Ok(rec) => {
                    tracing::debug!(crop = %rec.recommended_crop, "Recommendation received");
                    recommendation.set(Some(rec));
                }
                Err(e) => tracing::error!("Error fetching crop recommendation: {}", e),
            }
        });
    };

    let tile_url = config.read().tile_url.clone();

    rsx! {
        div { class: "map-page",
            MapView { view, tile_url }

            SoilFormCard { soil, on_submit }

            if let Some(w) = &*weather.read() {
                WeatherCard { weather: w.clone() }
            }

            if let Some(rec) = &*recommendation.read() {
                RecommendationCard { recommendation: rec.clone() }
            }
        }
    }
}
