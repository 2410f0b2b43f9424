//! Shaping of provider payloads into the values the pages display.

use chrono::{DateTime, Local};

use crate::error::WeatherError;
use crate::weather::CurrentWeatherPayload;

/// Current conditions for the single-city results page.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temp: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
}

/// One side of a comparison; readings are rounded to whole numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CityComparison {
    pub city: String,
    pub temp: i64,
    pub humidity: f64,
    pub wind_speed: i64,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
    pub units_letter: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub date: DateTime<Local>,
    pub city1_info: CityComparison,
    pub city2_info: CityComparison,
}

impl ComparisonReport {
    pub fn new(date: DateTime<Local>, city1_info: CityComparison, city2_info: CityComparison) -> Self {
        Self {
            date,
            city1_info,
            city2_info,
        }
    }
}

/// Fields shared by both report shapes, extracted once.
struct Readings {
    city: String,
    temp: f64,
    humidity: f64,
    wind_speed: f64,
    sunrise: DateTime<Local>,
    sunset: DateTime<Local>,
}

pub fn shape_single(payload: &CurrentWeatherPayload) -> Result<WeatherReport, WeatherError> {
    let readings = extract(payload)?;
    let description = payload
        .weather
        .as_ref()
        .and_then(|conditions| conditions.first())
        .and_then(|condition| condition.description.clone())
        .ok_or_else(|| missing(payload, "weather[0].description"))?;

    Ok(WeatherReport {
        city: readings.city,
        description,
        temp: readings.temp,
        humidity: readings.humidity,
        wind_speed: readings.wind_speed,
        sunrise: readings.sunrise,
        sunset: readings.sunset,
    })
}

pub fn shape_for_comparison(
    payload: &CurrentWeatherPayload,
    units_letter: &'static str,
) -> Result<CityComparison, WeatherError> {
    let readings = extract(payload)?;

    Ok(CityComparison {
        city: readings.city,
        temp: readings.temp.round() as i64,
        humidity: readings.humidity,
        wind_speed: readings.wind_speed.round() as i64,
        sunrise: readings.sunrise,
        sunset: readings.sunset,
        units_letter,
    })
}

fn extract(payload: &CurrentWeatherPayload) -> Result<Readings, WeatherError> {
    let city = payload.name.clone().ok_or_else(|| missing(payload, "name"))?;

    let main = payload.main.as_ref().ok_or_else(|| missing(payload, "main"))?;
    let temp = main.temp.ok_or_else(|| missing(payload, "main.temp"))?;
    let humidity = main.humidity.ok_or_else(|| missing(payload, "main.humidity"))?;

    let wind = payload.wind.as_ref().ok_or_else(|| missing(payload, "wind"))?;
    let wind_speed = wind.speed.ok_or_else(|| missing(payload, "wind.speed"))?;

    let sys = payload.sys.as_ref().ok_or_else(|| missing(payload, "sys"))?;
    let sunrise = sys.sunrise.ok_or_else(|| missing(payload, "sys.sunrise"))?;
    let sunset = sys.sunset.ok_or_else(|| missing(payload, "sys.sunset"))?;

    Ok(Readings {
        city,
        temp,
        humidity,
        wind_speed,
        sunrise: local_time(sunrise)?,
        sunset: local_time(sunset)?,
    })
}

fn local_time(epoch_secs: i64) -> Result<DateTime<Local>, WeatherError> {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or(WeatherError::InvalidTimestamp(epoch_secs))
}

fn missing(payload: &CurrentWeatherPayload, field: &'static str) -> WeatherError {
    WeatherError::MissingField {
        field,
        provider_message: payload.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> CurrentWeatherPayload {
        serde_json::from_value(value).unwrap()
    }

    fn paris() -> CurrentWeatherPayload {
        payload(json!({
            "name": "Paris",
            "weather": [{ "description": "clear sky" }],
            "main": { "temp": 15.5, "humidity": 60 },
            "wind": { "speed": 3.4 },
            "sys": { "sunrise": 1700000000, "sunset": 1700040000 }
        }))
    }

    fn local(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn single_report_passes_values_through() {
        let report = shape_single(&paris()).unwrap();

        assert_eq!(report.city, "Paris");
        assert_eq!(report.description, "clear sky");
        assert_eq!(report.temp, 15.5);
        assert_eq!(report.humidity, 60.0);
        assert_eq!(report.wind_speed, 3.4);
        assert_eq!(report.sunrise, local(1700000000));
        assert_eq!(report.sunset, local(1700040000));
    }

    #[test]
    fn comparison_rounds_temp_and_wind() {
        let info = shape_for_comparison(&paris(), "C").unwrap();

        assert_eq!(info.city, "Paris");
        assert_eq!(info.temp, 16);
        assert_eq!(info.wind_speed, 3);
        assert_eq!(info.humidity, 60.0);
        assert_eq!(info.sunset, local(1700040000));
        assert_eq!(info.units_letter, "C");
    }

    #[test]
    fn comparison_does_not_need_a_description() {
        let mut no_conditions = paris();
        no_conditions.weather = Some(vec![]);

        assert!(shape_for_comparison(&no_conditions, "K").is_ok());
        assert!(matches!(
            shape_single(&no_conditions),
            Err(WeatherError::MissingField { field: "weather[0].description", .. })
        ));
    }

    #[test]
    fn missing_main_is_an_error_not_a_default() {
        let no_main = payload(json!({
            "name": "Paris",
            "weather": [{ "description": "clear sky" }],
            "wind": { "speed": 3.4 },
            "sys": { "sunrise": 1700000000, "sunset": 1700040000 }
        }));

        for result in [
            shape_single(&no_main).map(|_| ()),
            shape_for_comparison(&no_main, "F").map(|_| ()),
        ] {
            assert!(matches!(result, Err(WeatherError::MissingField { field: "main", .. })));
        }
    }

    #[test]
    fn provider_error_body_carries_its_message() {
        let not_found = payload(json!({ "cod": "404", "message": "city not found" }));

        let err = shape_for_comparison(&not_found, "C").unwrap_err();
        match err {
            WeatherError::MissingField {
                field,
                provider_message,
            } => {
                assert_eq!(field, "name");
                assert_eq!(provider_message.as_deref(), Some("city not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn nested_missing_keys_are_named() {
        let mut no_speed = paris();
        no_speed.wind.as_mut().unwrap().speed = None;

        let err = shape_single(&no_speed).unwrap_err();
        assert_eq!(err.to_string(), "weather response is missing `wind.speed`");
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let mut far_future = paris();
        far_future.sys.as_mut().unwrap().sunset = Some(i64::MAX);

        assert!(matches!(
            shape_single(&far_future),
            Err(WeatherError::InvalidTimestamp(i64::MAX))
        ));
    }

    #[test]
    fn comparison_order_only_swaps_sides() {
        let date = local(1700020000);
        let berlin = payload(json!({
            "name": "Berlin",
            "weather": [{ "description": "overcast clouds" }],
            "main": { "temp": 7.6, "humidity": 81 },
            "wind": { "speed": 5.5 },
            "sys": { "sunrise": 1700001000, "sunset": 1700033000 }
        }));

        let paris_info = shape_for_comparison(&paris(), "C").unwrap();
        let berlin_info = shape_for_comparison(&berlin, "C").unwrap();

        let forward = ComparisonReport::new(date, paris_info.clone(), berlin_info.clone());
        let backward = ComparisonReport::new(date, berlin_info, paris_info);

        assert_eq!(forward.city1_info, backward.city2_info);
        assert_eq!(forward.city2_info, backward.city1_info);
        assert_eq!(forward.city2_info.temp, 8);
        assert_eq!(forward.city2_info.wind_speed, 6);
    }
}
