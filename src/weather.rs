use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::WeatherError;

/// Body of the provider's current-weather endpoint.
///
/// Every field is optional: an error body such as
/// `{"cod": "404", "message": "city not found"}` decodes fine and only fails
/// once the report is shaped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: Option<String>,
    pub weather: Option<Vec<Condition>>,
    pub main: Option<MainConditions>,
    pub wind: Option<Wind>,
    pub sys: Option<Sun>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainConditions {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sun {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Looks up current conditions; `units` is forwarded as-is.
    async fn fetch(
        &self,
        city: &str,
        units: Option<&str>,
    ) -> Result<CurrentWeatherPayload, WeatherError>;
}

pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            base_url: config.api_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(
        &self,
        city: &str,
        units: Option<&str>,
    ) -> Result<CurrentWeatherPayload, WeatherError> {
        let mut params = vec![("q", city), ("appid", self.api_key.as_str())];
        if let Some(units) = units {
            params.push(("units", units));
        }

        info!("🌤️  Fetching current weather for {:?}", city);

        // Status is not checked; error bodies are JSON and fail when shaped.
        let body = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .text()
            .await?;

        let raw: serde_json::Value = serde_json::from_str(&body)?;
        debug!("Provider response for {:?}: {:#}", city, raw);

        Ok(serde_json::from_value(raw)?)
    }
}
