//! Client for the paginated weather records endpoint.

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::session::Session;

const USER_AGENT: &str = concat!("wxrec/", env!("CARGO_PKG_VERSION"));

/// The UI cares about one failure class only; the underlying error message
/// is surfaced verbatim. Non-2xx statuses land here via `error_for_status`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

/// One weather observation. The leading-space field names are how the data
/// source actually serializes its columns and must be read verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub datetime_utc: Option<String>,

    #[serde(rename = " _conds")]
    pub condition: Option<String>,

    #[serde(rename = " _tempm")]
    pub temperature: Option<f64>,

    #[serde(rename = " _hum")]
    pub humidity: Option<f64>,

    #[serde(rename = " _pressurem")]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    #[serde(rename = "avgTemp")]
    pub avg_temp: Option<f64>,

    #[serde(rename = "avgHumidity")]
    pub avg_humidity: Option<f64>,

    #[serde(rename = "avgPressure")]
    pub avg_pressure: Option<f64>,
}

/// Server payload for one page of records plus pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub records: Vec<Record>,

    pub stats: Option<Stats>,

    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub per_page: u32,
}

#[derive(Debug, Clone)]
pub struct RecordsClient {
    http: Client,
    base_url: String,
}

impl RecordsClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch_page(&self, session: Session) -> Result<PageResponse, ApiError> {
        let url = format!("{}/api/records", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("page", session.page.to_string()),
                ("per_page", session.per_page.to_string()),
                ("sort", session.sort_field.as_str().to_string()),
                ("order", session.sort_direction.as_str().to_string()),
            ])
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_with_quirky_keys() {
        let body = r#"{
            "records": [
                {
                    "datetime_utc": "1996-11-01 11:00:00",
                    " _conds": "Smoke",
                    " _tempm": 30.0,
                    " _hum": 27.0,
                    " _pressurem": 1010.0
                },
                {
                    "datetime_utc": null,
                    " _conds": null,
                    " _tempm": null,
                    " _hum": null,
                    " _pressurem": null
                }
            ],
            "current_page": 1,
            "total_pages": 4823,
            "total_records": 96453,
            "per_page": 20
        }"#;

        let page: PageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].condition.as_deref(), Some("Smoke"));
        assert_eq!(page.records[0].temperature, Some(30.0));
        assert!(page.records[1].condition.is_none());
        assert!(page.records[1].temperature.is_none());
        assert!(page.stats.is_none());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 4823);
        assert_eq!(page.per_page, 20);
    }

    #[test]
    fn parses_optional_stats() {
        let body = r#"{
            "records": [],
            "stats": {"avgTemp": 25.4, "avgHumidity": 58.1, "avgPressure": 1004.0},
            "current_page": 1,
            "total_pages": 0,
            "total_records": 0,
            "per_page": 20
        }"#;

        let page: PageResponse = serde_json::from_str(body).unwrap();
        let stats = page.stats.unwrap();
        assert_eq!(stats.avg_temp, Some(25.4));
        assert_eq!(stats.avg_humidity, Some(58.1));
        assert_eq!(stats.avg_pressure, Some(1004.0));
        assert!(page.records.is_empty());
    }

    #[test]
    fn partial_stats_deserialize() {
        let body = r#"{
            "records": [],
            "stats": {"avgTemp": 25.4},
            "current_page": 1,
            "total_pages": 0,
            "total_records": 0,
            "per_page": 20
        }"#;

        let page: PageResponse = serde_json::from_str(body).unwrap();
        let stats = page.stats.unwrap();
        assert_eq!(stats.avg_temp, Some(25.4));
        assert!(stats.avg_humidity.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = RecordsClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }
}
