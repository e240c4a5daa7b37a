use cropmap_shared::models::{ClientConfig, CropRecommendation, CurrentWeatherResponse, Location, Weather};
use cropmap_shared::soil::RecommendationRequest;
use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    Url(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Build the current-weather request URL for a position.
pub fn weather_url(config: &ClientConfig, location: Location) -> Result<Url, ApiError> {
    Url::parse_with_params(
        &config.weather_url,
        &[
            ("lat", location.lat.to_string()),
            ("lon", location.lon.to_string()),
            ("units", "metric".to_string()),
            ("appid", config.weather_api_key.clone()),
        ],
    )
    .map_err(|e| ApiError::Url(format!("{}: {}", config.weather_url, e)))
}

/// Location of the runtime config endpoint for a page origin.
pub fn config_url(origin: &str) -> String {
    format!("{}/api/config", origin.trim_end_matches('/'))
}

fn page_origin() -> Result<String, ApiError> {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .ok_or_else(|| ApiError::Url("no page origin".to_string()))
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn fetch_config() -> Result<ClientConfig, ApiError> {
    let url = config_url(&page_origin()?);
    let resp = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    decode(resp).await
}

/// Project a decoded weather body; a body without conditions is not shown.
pub fn weather_from_response(body: CurrentWeatherResponse) -> Result<Weather, ApiError> {
    Weather::try_from(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn fetch_weather(url: Url) -> Result<Weather, ApiError> {
    let resp = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    weather_from_response(decode(resp).await?)
}

pub async fn recommend_crop(
    config: &ClientConfig,
    request: &RecommendationRequest,
) -> Result<CropRecommendation, ApiError> {
    let resp = reqwest::Client::new()
        .post(&config.recommend_url)
        .json(request)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    decode(resp).await
}
