//! Current weather lookup and the weather → mood mapping.

use std::time::Duration;

use reqwest::Client;

use crate::{config, error::WeatherError, mood::Mood, types::Weather};

const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the current weather for a city from OpenWeatherMap (metric units).
pub async fn current_weather(city: &str) -> Result<Weather, WeatherError> {
    let api_key = config::weather_api_key()?;

    let weather: Weather = Client::new()
        .get(config::weather_api_url())
        .query(&[("q", city), ("appid", api_key.as_str()), ("units", "metric")])
        .timeout(WEATHER_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if weather.weather.is_empty() {
        return Err(WeatherError::Empty(city.to_string()));
    }
    Ok(weather)
}

/// Maps a weather description to a mood. Unlisted descriptions are neutral.
pub fn mood_for_description(description: &str) -> Mood {
    match description.trim().to_lowercase().as_str() {
        "clear sky" => Mood::Energetic,
        "overcast clouds" => Mood::Thoughtful,
        "light rain" => Mood::Relaxed,
        "thunderstorm" => Mood::Intense,
        _ => Mood::Neutral,
    }
}

/// Mood for the first reported weather condition.
pub fn mood_for_weather(weather: &Weather) -> Mood {
    weather
        .description()
        .map(mood_for_description)
        .unwrap_or(Mood::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{WeatherCondition, WeatherMain};

    #[test]
    fn maps_known_descriptions() {
        assert_eq!(mood_for_description("clear sky"), Mood::Energetic);
        assert_eq!(mood_for_description("Overcast Clouds"), Mood::Thoughtful);
        assert_eq!(mood_for_description("light rain"), Mood::Relaxed);
        assert_eq!(mood_for_description("thunderstorm"), Mood::Intense);
    }

    #[test]
    fn unknown_descriptions_are_neutral() {
        assert_eq!(mood_for_description("volcanic ash"), Mood::Neutral);
        assert_eq!(mood_for_description(""), Mood::Neutral);
    }

    #[test]
    fn weather_without_conditions_is_neutral() {
        let weather = Weather {
            main: WeatherMain { temp: 12.5 },
            weather: Vec::new(),
        };
        assert_eq!(mood_for_weather(&weather), Mood::Neutral);

        let weather = Weather {
            main: WeatherMain { temp: 25.0 },
            weather: vec![WeatherCondition {
                description: "clear sky".into(),
            }],
        };
        assert_eq!(mood_for_weather(&weather), Mood::Energetic);
    }
}
