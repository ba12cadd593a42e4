//! Weather widget backed by the Open-Meteo forecast API.
//!
//! A fixed coordinate (Kolkata), polled every ten minutes and on demand.
//! Fetches run on a worker thread and report through a channel the UI tick
//! drains; any failure degrades the widget to "weather unavailable".

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{Local, Timelike};
use serde::Deserialize;

use crate::constants::WEATHER_REFRESH;
use crate::error::ServiceError;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast\
    ?latitude=22.5726&longitude=88.3639\
    &current_weather=true\
    &hourly=temperature_2m,relative_humidity_2m,precipitation,weathercode\
    &timezone=Asia%2FKolkata";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const LOCATION: &str = "Kolkata";

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temp_c: i32,
    pub description: &'static str,
    pub glyph: &'static str,
    pub location: &'static str,
    pub humidity: i32,
    pub wind_kmh: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    Loading,
    Ready(WeatherReport),
    Unavailable,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    hourly: Hourly,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u16,
    is_day: u8,
}

#[derive(Debug, Deserialize)]
struct Hourly {
    relative_humidity_2m: Vec<f64>,
}

/// WMO weather interpretation codes, as Open-Meteo reports them.
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing Rime Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        56 => "Light Freezing Drizzle",
        57 => "Dense Freezing Drizzle",
        61 => "Slight Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        66 => "Light Freezing Rain",
        67 => "Heavy Freezing Rain",
        71 => "Slight Snow Fall",
        73 => "Moderate Snow Fall",
        75 => "Heavy Snow Fall",
        77 => "Snow Grains",
        80 => "Slight Rain Showers",
        81 => "Moderate Rain Showers",
        82 => "Violent Rain Showers",
        85 => "Slight Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm With Hail",
        99 => "Thunderstorm With Heavy Hail",
        _ => "Unknown",
    }
}

/// Single-cell glyph for the taskbar.
pub fn weather_glyph(code: u16, is_day: bool) -> &'static str {
    match code {
        0 | 1 => {
            if is_day {
                "☀"
            } else {
                "☾"
            }
        }
        2 => "⛅",
        3 => "☁",
        45..=48 => "≋",
        51..=57 | 80..=82 => "☔",
        61..=67 => "☂",
        71..=77 | 85..=86 => "❄",
        95..=99 => "⚡",
        _ => "⛅",
    }
}

fn report_from(response: ForecastResponse, hour: usize) -> WeatherReport {
    let current = response.current_weather;
    let humidity = response
        .hourly
        .relative_humidity_2m
        .get(hour)
        .copied()
        .unwrap_or(50.0);
    WeatherReport {
        temp_c: current.temperature.round() as i32,
        description: describe_weather_code(current.weathercode),
        glyph: weather_glyph(current.weathercode, current.is_day == 1),
        location: LOCATION,
        humidity: humidity.round() as i32,
        wind_kmh: current.windspeed.round() as i32,
    }
}

fn fetch_current() -> Result<WeatherReport, ServiceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let response = client.get(FORECAST_URL).send()?.error_for_status()?;
    let decoded: ForecastResponse = response
        .json()
        .map_err(|err| ServiceError::Decode(err.to_string()))?;
    Ok(report_from(decoded, Local::now().hour() as usize))
}

/// Owns the poll cadence and the worker channel.
pub struct WeatherService {
    state: WeatherState,
    tx: Sender<Result<WeatherReport, ServiceError>>,
    rx: Receiver<Result<WeatherReport, ServiceError>>,
    last_fetch: Option<Instant>,
    in_flight: bool,
    offline: bool,
}

impl WeatherService {
    pub fn new(offline: bool) -> Self {
        let (tx, rx) = channel();
        let mut service = Self {
            state: if offline {
                WeatherState::Unavailable
            } else {
                WeatherState::Loading
            },
            tx,
            rx,
            last_fetch: None,
            in_flight: false,
            offline,
        };
        service.refresh();
        service
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    /// Kick off a fetch (manual trigger or cadence). Ignored while offline
    /// or while a fetch is already in flight.
    pub fn refresh(&mut self) {
        if self.offline || self.in_flight {
            return;
        }
        self.in_flight = true;
        self.state = WeatherState::Loading;
        self.last_fetch = Some(Instant::now());
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(fetch_current());
        });
    }

    /// Drain worker results and re-poll when the refresh interval lapses.
    pub fn tick(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.in_flight = false;
            self.state = match result {
                Ok(report) => WeatherState::Ready(report),
                Err(err) => {
                    tracing::warn!(%err, "weather fetch failed");
                    WeatherState::Unavailable
                }
            };
        }
        if !self.offline
            && !self.in_flight
            && self
                .last_fetch
                .is_none_or(|at| at.elapsed() >= WEATHER_REFRESH)
        {
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn known_codes_have_descriptions() {
        assert_eq!(describe_weather_code(0), "Clear Sky");
        assert_eq!(describe_weather_code(3), "Overcast");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(42), "Unknown");
    }

    #[test]
    fn glyph_depends_on_daylight_for_clear_sky() {
        assert_eq!(weather_glyph(0, true), "☀");
        assert_eq!(weather_glyph(0, false), "☾");
        assert_eq!(weather_glyph(71, true), "❄");
        assert_eq!(weather_glyph(1234, true), "⛅");
    }

    #[test]
    fn forecast_json_decodes_into_a_report() {
        let body = indoc! {r#"
            {
              "current_weather": {
                "temperature": 30.6,
                "windspeed": 11.5,
                "winddirection": 190.0,
                "weathercode": 2,
                "is_day": 1,
                "time": "2026-08-06T15:00"
              },
              "hourly": {
                "relative_humidity_2m": [70.0, 68.0, 64.4]
              }
            }
        "#};
        let decoded: ForecastResponse = serde_json::from_str(body).unwrap();
        let report = report_from(decoded, 2);
        assert_eq!(report.temp_c, 31);
        assert_eq!(report.description, "Partly Cloudy");
        assert_eq!(report.glyph, "⛅");
        assert_eq!(report.humidity, 64);
        assert_eq!(report.wind_kmh, 12);
        assert_eq!(report.location, "Kolkata");
    }

    #[test]
    fn missing_humidity_sample_falls_back() {
        let response = ForecastResponse {
            current_weather: CurrentWeather {
                temperature: 20.0,
                windspeed: 3.0,
                weathercode: 0,
                is_day: 0,
            },
            hourly: Hourly {
                relative_humidity_2m: vec![],
            },
        };
        let report = report_from(response, 5);
        assert_eq!(report.humidity, 50);
        assert_eq!(report.glyph, "☾");
    }

    #[test]
    fn offline_service_reports_unavailable_without_fetching() {
        let mut service = WeatherService::new(true);
        assert_eq!(*service.state(), WeatherState::Unavailable);
        service.tick();
        assert_eq!(*service.state(), WeatherState::Unavailable);
        assert!(!service.in_flight);
    }
}
