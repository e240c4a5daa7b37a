use cropmap_shared::models::Weather;
use dioxus::prelude::*;

/// Detail lines under the temperature headline.
pub fn weather_details(weather: &Weather) -> [String; 3] {
    [
        format!("Feels like: {}\u{00b0}C", weather.feels_like),
        format!("Humidity: {}%", weather.humidity),
        format!("Wind: {} m/s", weather.wind_speed),
    ]
}

#[component]
pub fn WeatherCard(weather: Weather) -> Element {
    let details = weather_details(&weather);

    rsx! {
        div { class: "card weather-card",
            div { class: "card-header",
                h3 { class: "card-title", "{weather.location}" }
                p { class: "card-description", "{weather.description}" }
            }
            div { class: "card-content weather-body",
                img {
                    class: "weather-icon",
                    src: "{weather.icon_url()}",
                    alt: "Weather Icon",
                }
                div { class: "weather-values",
                    p { class: "weather-temp", "{weather.temperature}\u{00b0}C" }
                    for line in details {
                        p { class: "weather-detail", "{line}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_details() {
        let weather = Weather {
            location: "Pune".to_string(),
            temperature: 31.2,
            description: "haze".to_string(),
            icon: "50d".to_string(),
            feels_like: 33.0,
            humidity: 48.0,
            wind_speed: 3.6,
        };
        assert_eq!(
            weather_details(&weather),
            [
                "Feels like: 33\u{00b0}C".to_string(),
                "Humidity: 48%".to_string(),
                "Wind: 3.6 m/s".to_string(),
            ]
        );
    }
}
