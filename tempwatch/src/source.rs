//! Where raw Celsius readings come from: a scraped forecast page, or nowhere.

use std::future::Future;
use std::time::Duration;

use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("no element matched `{0}`")]
    MissingElement(String),
    #[error("could not read a temperature from {0:?}")]
    Parse(String),
    #[error("source disabled (offline mode)")]
    Offline,
}

pub trait TemperatureSource {
    /// One reading in degrees Celsius.
    fn fetch_celsius(&self) -> impl Future<Output = Result<f64, FetchError>> + Send;
}

/// Scrapes a single temperature element out of an HTML page.
pub struct HtmlSource {
    client: reqwest::Client,
    url: Url,
    selector: Selector,
    selector_text: String,
}

impl HtmlSource {
    pub fn new(url: &str, selector: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let url = parse_source_url(url)?;
        let parsed = Selector::parse(selector)
            .map_err(|e| ConfigError::Selector(selector.to_string(), e.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tempwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            url,
            selector: parsed,
            selector_text: selector.to_string(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl TemperatureSource for HtmlSource {
    async fn fetch_celsius(&self) -> Result<f64, FetchError> {
        let resp = self.client.get(self.url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        extract_celsius(&body, &self.selector)
            .map_err(|e| match e {
                FetchError::MissingElement(_) => FetchError::MissingElement(self.selector_text.clone()),
                other => other,
            })
    }
}

/// Never produces a reading, so every tick takes the synthetic path.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSource;

impl TemperatureSource for OfflineSource {
    async fn fetch_celsius(&self) -> Result<f64, FetchError> {
        Err(FetchError::Offline)
    }
}

pub fn parse_source_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Url(raw.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Url(
            raw.to_string(),
            format!("unsupported scheme `{other}`"),
        )),
    }
}

/// Text of the first matching element, e.g. `22.5°`, as a number.
pub fn extract_celsius(html: &str, selector: &Selector) -> Result<f64, FetchError> {
    let doc = Html::parse_document(html);
    let text: String = doc
        .select(selector)
        .next()
        .ok_or_else(|| FetchError::MissingElement(String::new()))?
        .text()
        .collect();
    parse_reading(&text)
}

pub fn parse_reading(text: &str) -> Result<f64, FetchError> {
    let cleaned = text.trim().trim_matches('°').trim();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FetchError::Parse(cleaned.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_selector() -> Selector {
        Selector::parse("em.temp").unwrap()
    }

    #[test]
    fn reads_first_matching_element() {
        let html = r#"<html><body>
            <p>Sydney</p>
            <em class="temp">22.5°</em>
            <em class="temp">19.0°</em>
        </body></html>"#;
        let c = extract_celsius(html, &temp_selector()).unwrap();
        assert_eq!(c, 22.5);
    }

    #[test]
    fn missing_element_is_an_error() {
        let html = "<html><body><em class=\"rain\">5mm</em></body></html>";
        assert!(matches!(
            extract_celsius(html, &temp_selector()),
            Err(FetchError::MissingElement(_))
        ));
    }

    #[test]
    fn garbage_text_is_an_error() {
        let html = "<em class=\"temp\">--°</em>";
        assert!(matches!(
            extract_celsius(html, &temp_selector()),
            Err(FetchError::Parse(t)) if t == "--"
        ));
    }

    #[test]
    fn parse_reading_strips_degree_sign_and_space() {
        assert_eq!(parse_reading(" 22.5° ").unwrap(), 22.5);
        assert_eq!(parse_reading("-3").unwrap(), -3.0);
        assert!(parse_reading("NaN").is_err());
        assert!(parse_reading("").is_err());
    }

    #[test]
    fn source_url_must_be_http() {
        assert!(parse_source_url("http://www.bom.gov.au/nsw/forecasts/sydney.shtml").is_ok());
        assert!(parse_source_url("ftp://example.com/x").is_err());
        assert!(parse_source_url("not a url").is_err());
    }

    #[test]
    fn bad_selector_is_a_config_error() {
        let err = HtmlSource::new("http://example.com/", "em[", Duration::from_secs(1));
        assert!(matches!(err, Err(ConfigError::Selector(..))));
    }

    #[tokio::test]
    async fn offline_source_always_fails() {
        assert!(matches!(
            OfflineSource.fetch_celsius().await,
            Err(FetchError::Offline)
        ));
    }
}
