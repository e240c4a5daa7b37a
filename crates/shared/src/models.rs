use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_RECOMMEND_URL: &str = "http://127.0.0.1:8000/recommend_crop/";
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_MARKER_RADIUS_M: f64 = 500.0;

/// A resolved device position in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Location { lat, lon }
    }
}

/// Settings the client needs at runtime. Served by the backend at
/// `/api/config`; the defaults are used when that endpoint is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub weather_url: String,
    pub weather_api_key: String,
    pub recommend_url: String,
    pub tile_url: String,
    pub marker_radius_m: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            weather_api_key: String::new(),
            recommend_url: DEFAULT_RECOMMEND_URL.to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            marker_radius_m: DEFAULT_MARKER_RADIUS_M,
        }
    }
}

// Current-weather payload, limited to the fields the weather card reads.

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub name: String,
    pub main: WeatherMain,
    pub weather: Vec<WeatherCondition>,
    pub wind: WeatherWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherWind {
    pub speed: f64,
}

/// Flattened view of the current weather at the user's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub location: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl Weather {
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("weather response has no conditions")]
    NoConditions,
}

impl TryFrom<CurrentWeatherResponse> for Weather {
    type Error = WeatherError;

    fn try_from(resp: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        // Only the first condition is shown
        let condition = resp
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::NoConditions)?;
        Ok(Weather {
            location: resp.name,
            temperature: resp.main.temp,
            description: condition.description,
            icon: condition.icon,
            feels_like: resp.main.feels_like,
            humidity: resp.main.humidity,
            wind_speed: resp.wind.speed,
        })
    }
}

/// Response of the recommendation service, rendered as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub recommended_crop: String,
    #[serde(default)]
    pub crop_image_url: String,
    pub weather_data: WeatherEcho,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data: Option<SoilEcho>,
}

/// Weather values the service used for its prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherEcho {
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilEcho {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub ph: f64,
    pub rainfall: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER_JSON: &str = r#"{
        "coord": {"lon": 77.59, "lat": 12.97},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": 27.4, "feels_like": 28.1, "temp_min": 26.0, "temp_max": 28.0, "pressure": 1012, "humidity": 61},
        "wind": {"speed": 4.12, "deg": 250},
        "name": "Bengaluru",
        "cod": 200
    }"#;

    #[test]
    fn test_weather_projection_from_response() {
        let resp: CurrentWeatherResponse = serde_json::from_str(WEATHER_JSON).unwrap();
        let weather = Weather::try_from(resp).unwrap();
        assert_eq!(weather.location, "Bengaluru");
        assert_eq!(weather.description, "scattered clouds");
        assert_eq!(weather.icon, "03d");
        assert!((weather.temperature - 27.4).abs() < 1e-9);
        assert!((weather.feels_like - 28.1).abs() < 1e-9);
        assert!((weather.humidity - 61.0).abs() < 1e-9);
        assert!((weather.wind_speed - 4.12).abs() < 1e-9);
    }

    #[test]
    fn test_weather_icon_url() {
        let resp: CurrentWeatherResponse = serde_json::from_str(WEATHER_JSON).unwrap();
        let weather = Weather::try_from(resp).unwrap();
        assert_eq!(
            weather.icon_url(),
            "https://openweathermap.org/img/wn/03d@2x.png"
        );
    }

    #[test]
    fn test_weather_without_conditions_is_rejected() {
        let json = r#"{"weather":[],"main":{"temp":1.0,"feels_like":0.5,"humidity":90},"wind":{"speed":0.0}}"#;
        let resp: CurrentWeatherResponse = serde_json::from_str(json).unwrap();
        assert_eq!(Weather::try_from(resp), Err(WeatherError::NoConditions));
    }

    #[test]
    fn test_weather_without_name_keeps_blank_title() {
        let json = r#"{"weather":[{"description":"clear sky","icon":"01n"}],"main":{"temp":1.0,"feels_like":0.5,"humidity":90},"wind":{"speed":0.0}}"#;
        let resp: CurrentWeatherResponse = serde_json::from_str(json).unwrap();
        let weather = Weather::try_from(resp).unwrap();
        assert!(weather.location.is_empty());
        assert_eq!(weather.icon_url(), "https://openweathermap.org/img/wn/01n@2x.png");
    }

    #[test]
    fn test_weather_error_body_does_not_parse() {
        let json = r#"{"cod":401,"message":"Invalid API key."}"#;
        assert!(serde_json::from_str::<CurrentWeatherResponse>(json).is_err());
    }

    #[test]
    fn test_recommendation_deserializes_full_response() {
        let json = r#"{
            "recommended_crop": "rice",
            "crop_image_url": "https://example.com/rice.jpg",
            "weather_data": {"temperature": 26.5, "humidity": 82},
            "input_data": {"N": 90, "P": 42, "K": 43, "ph": 6.5, "rainfall": 202.9}
        }"#;
        let rec: CropRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.recommended_crop, "rice");
        assert_eq!(rec.crop_image_url, "https://example.com/rice.jpg");
        assert_eq!(rec.weather_data.temperature, 26.5);
        assert_eq!(rec.weather_data.humidity, 82.0);
        let input = rec.input_data.unwrap();
        assert_eq!(input.n, 90.0);
        assert_eq!(input.rainfall, 202.9);
    }

    #[test]
    fn test_recommendation_without_input_echo() {
        let json = r#"{"recommended_crop":"Unknown Crop","crop_image_url":"","weather_data":{"temperature":10.0,"humidity":40}}"#;
        let rec: CropRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.recommended_crop, "Unknown Crop");
        assert!(rec.crop_image_url.is_empty());
        assert!(rec.input_data.is_none());
    }

    #[test]
    fn test_client_config_serializes_camel_case() {
        let json = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(json["weatherUrl"], DEFAULT_WEATHER_URL);
        assert_eq!(json["recommendUrl"], DEFAULT_RECOMMEND_URL);
        assert_eq!(json["tileUrl"], DEFAULT_TILE_URL);
        assert_eq!(json["markerRadiusM"], 500.0);
        assert_eq!(json["weatherApiKey"], "");
    }
}
