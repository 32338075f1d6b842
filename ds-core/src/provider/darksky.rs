use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    model::{ForecastResponse, Granularity},
};

use super::{ForecastProvider, ForecastRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct DarkSkyProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl DarkSkyProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Provider talking to another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// `{base}/forecast/{key}/{lat},{lon}?lang=..&units=..&exclude=..`
    pub fn forecast_url(&self, request: &ForecastRequest) -> String {
        format!(
            "{}{}",
            self.base_url,
            forecast_path(&self.api_key, request)
        )
    }
}

fn forecast_path(api_key: &str, request: &ForecastRequest) -> String {
    let exclude = request
        .exclude()
        .iter()
        .map(|block| block.as_str())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "/forecast/{}/{},{}?lang={}&units={}&exclude={}",
        api_key, request.latitude, request.longitude, request.lang, request.units, exclude
    )
}

#[async_trait]
impl ForecastProvider for DarkSkyProvider {
    #[instrument(skip(self), fields(granularity = request.granularity.describe()))]
    async fn fetch(&self, request: &ForecastRequest) -> Result<ForecastResponse, FetchError> {
        debug!(
            url = %format!("{}{}", self.base_url, forecast_path("<key>", request)),
            "requesting forecast"
        );

        let res = self
            .http
            .get(self.forecast_url(request))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized { status });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(FetchError::Decode)?;

        let missing = match request.granularity {
            Granularity::Current if parsed.currently.is_none() => Some("currently"),
            Granularity::Today if parsed.hourly.is_none() => Some("hourly"),
            Granularity::Week if parsed.daily.is_none() => Some("daily"),
            _ => None,
        };
        if let Some(block) = missing {
            return Err(FetchError::MissingBlock(block));
        }

        debug!(timezone = %parsed.timezone, "forecast received");
        Ok(parsed)
    }
}

/// The request URL carries the API key, so it never goes into the error.
fn transport(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.without_url())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{locale::Language, model::Units};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(granularity: Granularity) -> ForecastRequest {
        ForecastRequest {
            latitude: 41.041512,
            longitude: 29.003836,
            lang: Language::Tr,
            units: Units::Si,
            granularity,
        }
    }

    fn current_body() -> serde_json::Value {
        json!({
            "latitude": 41.041512,
            "longitude": 29.003836,
            "timezone": "Europe/Istanbul",
            "offset": 3,
            "currently": {
                "time": 1_700_000_000,
                "summary": "Açık",
                "temperature": 14.2,
                "precipProbability": 0,
                "pressure": 1016.4,
                "windSpeed": 3.1,
                "windBearing": 40,
                "cloudCover": 0.2,
                "uvIndex": 1
            }
        })
    }

    #[test]
    fn builds_dark_sky_url() {
        let provider = DarkSkyProvider::new("KEY".into());

        assert_eq!(
            provider.forecast_url(&request(Granularity::Current)),
            "https://api.darksky.net/forecast/KEY/41.041512,29.003836\
             ?lang=tr&units=si&exclude=minutely,hourly,daily,alerts,flags"
        );
        assert!(
            provider
                .forecast_url(&request(Granularity::Week))
                .ends_with("exclude=currently,minutely,hourly,alerts,flags")
        );
    }

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "ğ".repeat(300);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn fetch_parses_current_forecast() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast/KEY/41.041512,29.003836"))
            .and(query_param("lang", "tr"))
            .and(query_param("units", "si"))
            .and(query_param("exclude", "minutely,hourly,daily,alerts,flags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = DarkSkyProvider::with_base_url("KEY".into(), &server.uri());
        let forecast = provider
            .fetch(&request(Granularity::Current))
            .await
            .expect("forecast should parse");

        assert_eq!(forecast.timezone, "Europe/Istanbul");
        let now = forecast.currently.expect("currently block");
        assert_eq!(now.wind_bearing, Some(40.0));
        assert_eq!(now.summary.as_deref(), Some("Açık"));
    }

    #[tokio::test]
    async fn forbidden_is_reported_as_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("daily usage limit exceeded"))
            .mount(&server)
            .await;

        let provider = DarkSkyProvider::with_base_url("BAD".into(), &server.uri());
        let err = provider
            .fetch(&request(Granularity::Today))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Unauthorized { .. }));
        assert!(err.to_string().contains("rejected the API key"));
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let provider = DarkSkyProvider::with_base_url("KEY".into(), &server.uri());
        let err = provider
            .fetch(&request(Granularity::Current))
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("upstream down"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let provider = DarkSkyProvider::with_base_url("KEY".into(), &server.uri());
        let err = provider
            .fetch(&request(Granularity::Current))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_requested_block_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let provider = DarkSkyProvider::with_base_url("KEY".into(), &server.uri());
        let err = provider
            .fetch(&request(Granularity::Week))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::MissingBlock("daily")));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let provider = DarkSkyProvider::with_base_url("SECRETKEY123".into(), "http://127.0.0.1:9");
        let err = provider
            .fetch(&request(Granularity::Current))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));

        let message = format!("{:#}", anyhow::Error::from(err));
        assert!(!message.contains("SECRETKEY123"), "key leaked: {message}");
        assert_eq!(message.matches("Failed to send request").count(), 1);
    }
}
