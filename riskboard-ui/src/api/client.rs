//! HTTP API Client
//!
//! `RiskApi` over the browser's `fetch`, using the shared endpoint table.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use riskboard::model::{AlertSet, CityRecord, CityRisk, NewCity, PredictionRequest, PredictionResult, SummaryStats, TrendPoint};
use riskboard::{Endpoint, RequestError, RequestResult, RiskApi};

/// Local storage key overriding the backend origin
pub const API_URL_KEY: &str = "riskboard_api_url";

/// Backend origin: local storage override, else the page's own origin
pub fn get_api_base() -> String {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return String::new(),
    };

    let stored = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    let url = stored
        .filter(|url| !url.trim().is_empty())
        .or_else(|| window.location().origin().ok())
        .unwrap_or_default();

    normalize_base(&url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// Trim whitespace and trailing slashes
pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Risk backend client for the browser
#[derive(Debug, Clone)]
pub struct BrowserClient {
    base_url: String,
}

impl BrowserClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(&base_url.into()),
        }
    }

    /// Client for the configured backend
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> RequestResult<T> {
        let url = endpoint.url(&self.base_url, query);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &impl serde::Serialize,
    ) -> RequestResult<T> {
        let url = endpoint.url(&self.base_url, &[]);

        let response = Request::post(&url)
            .json(body)
            .map_err(|e| RequestError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> RequestResult<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(RequestError::Status {
            status,
            message: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

#[async_trait(?Send)]
impl RiskApi for BrowserClient {
    async fn heatmap_data(&self) -> RequestResult<Vec<CityRisk>> {
        self.get_json(Endpoint::HeatmapData, &[]).await
    }

    async fn trend(&self, city: &str) -> RequestResult<Vec<TrendPoint>> {
        self.get_json(Endpoint::Trend, &[("city", city)]).await
    }

    async fn summary(&self) -> RequestResult<SummaryStats> {
        self.get_json(Endpoint::Summary, &[]).await
    }

    async fn alerts(&self) -> RequestResult<AlertSet> {
        self.get_json(Endpoint::Alerts, &[]).await
    }

    async fn city_info(&self, city: &str) -> RequestResult<serde_json::Value> {
        self.get_json(Endpoint::CityInfo, &[("city", city)]).await
    }

    async fn predict_risk(&self, request: &PredictionRequest) -> RequestResult<PredictionResult> {
        self.post_json(Endpoint::PredictRisk, request).await
    }

    async fn cities(&self, skip: u32, limit: u32) -> RequestResult<Vec<CityRecord>> {
        let skip = skip.to_string();
        let limit = limit.to_string();
        self.get_json(Endpoint::Cities, &[("skip", &skip), ("limit", &limit)])
            .await
    }

    async fn create_city(&self, city: &NewCity) -> RequestResult<CityRecord> {
        self.post_json(Endpoint::CreateCity, city).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(" http://localhost:8000/ "), "http://localhost:8000");
        assert_eq!(normalize_base("https://risk.example//"), "https://risk.example");
    }

    #[test]
    fn test_client_trims_base() {
        let client = BrowserClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
