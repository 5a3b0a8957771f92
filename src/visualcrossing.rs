//! Client and response models for the timeline weather API.

use chrono::NaiveDate;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;

use crate::config::Config;
use crate::units::Unit;

/// Field list requested from the API; everything the panels render.
pub const ELEMENTS: &str =
    "icon,address,conditions,humidity,cloudcover,sunrise,sunset,temp,datetime,tempmin,tempmax";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed weather payload: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct WeatherResponse {
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub days: Vec<DayRecord>,
}

/// One calendar day as reported by the API. Values the API omits come back
/// as `None`/empty and render as `--`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DayRecord {
    #[serde(default)]
    pub datetime: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub conditions: String,

    pub humidity: Option<f64>,

    pub cloudcover: Option<f64>,

    #[serde(default)]
    pub sunrise: String,

    #[serde(default)]
    pub sunset: String,

    pub temp: Option<f64>,

    pub tempmin: Option<f64>,

    pub tempmax: Option<f64>,
}

impl DayRecord {
    /// Calendar date parsed from the leading `YYYY-MM-DD` of `datetime`.
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime.get(..10)?.parse().ok()
    }
}

/// Blocking API client. Takes the injected [`Config`] at construction; one
/// instance lives on the fetch worker thread.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self {
            http: HttpClient::new(),
            config,
        }
    }

    /// Request URL for a location/unit pair. `unitGroup` is sent for metric
    /// only; imperial relies on the API default.
    pub fn request_url(&self, location: &str, unit: Unit) -> String {
        let mut url = format!(
            "{}{}?key={}&elements={}",
            self.config.base_url, location, self.config.api_key, ELEMENTS
        );
        if unit == Unit::Metric {
            url.push_str("&unitGroup=metric");
        }
        url
    }

    /// Fetch and decode the day list for a location.
    ///
    /// Non-success statuses are not rejected here; their bodies fall through
    /// to the JSON parser.
    pub fn fetch(&self, location: &str, unit: Unit) -> Result<WeatherResponse, FetchError> {
        let body = self
            .http
            .get(self.request_url(location, unit))
            .send()?
            .text()?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(Config {
            api_key: "KEY".to_string(),
            base_url: "https://api.test/forecast/".to_string(),
        })
    }

    #[test]
    fn metric_requests_carry_the_unit_group() {
        let url = client().request_url("Brighton", Unit::Metric);
        assert_eq!(
            url,
            format!("https://api.test/forecast/Brighton?key=KEY&elements={ELEMENTS}&unitGroup=metric")
        );
    }

    #[test]
    fn imperial_requests_omit_the_unit_group() {
        let url = client().request_url("Brighton", Unit::Imperial);
        assert!(!url.contains("unitGroup"));
        assert_eq!(
            url,
            format!("https://api.test/forecast/Brighton?key=KEY&elements={ELEMENTS}")
        );
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let payload = serde_json::json!({
            "address": "Brighton",
            "days": [{"datetime": "2026-08-06"}]
        });

        let response: WeatherResponse = serde_json::from_value(payload).unwrap();
        let day = &response.days[0];
        assert_eq!(day.datetime, "2026-08-06");
        assert_eq!(day.temp, None);
        assert_eq!(day.humidity, None);
        assert_eq!(day.conditions, "");
        assert_eq!(day.sunrise, "");
    }

    #[test]
    fn day_date_parses_the_iso_prefix() {
        let day = |datetime: &str| DayRecord {
            datetime: datetime.to_string(),
            ..DayRecord::default()
        };

        assert_eq!(day("2026-08-06").date(), NaiveDate::from_ymd_opt(2026, 8, 6));
        assert_eq!(
            day("2026-08-06T00:00:00").date(),
            NaiveDate::from_ymd_opt(2026, 8, 6)
        );
        assert_eq!(day("soon").date(), None);
        assert_eq!(day("not-a-date-at-all").date(), None);
    }
}
