//! Risk backend REST client
//!
//! `reqwest`-backed implementation of [`RiskApi`]. One request per call,
//! no retries, no auth. A timeout is only applied when configured.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::{Endpoint, RiskApi};
use crate::config::ApiConfig;
use crate::error::{RequestError, RequestResult};
use crate::model::{AlertSet, CityRecord, CityRisk, NewCity, PredictionRequest, PredictionResult, SummaryStats, TrendPoint};

/// HTTP client bound to one backend origin
#[derive(Debug, Clone)]
pub struct HttpRiskClient {
    client: Client,
    base_url: String,
}

impl HttpRiskClient {
    /// Create a client from API configuration
    pub fn new(config: &ApiConfig) -> RequestResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| RequestError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for a base URL with default settings
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> RequestResult<T> {
        let url = endpoint.url(&self.base_url, query);
        tracing::debug!(%endpoint, %url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%endpoint, error = %e, "request failed");
            RequestError::from(e)
        })?;

        Self::decode(endpoint, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> RequestResult<T> {
        let url = endpoint.url(&self.base_url, &[]);
        tracing::debug!(%endpoint, %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%endpoint, error = %e, "request failed");
                RequestError::from(e)
            })?;

        Self::decode(endpoint, response).await
    }

    /// Check the status, then decode the body as JSON
    async fn decode<T: DeserializeOwned>(endpoint: Endpoint, response: Response) -> RequestResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%endpoint, status = status.as_u16(), "backend returned error status");
            return Err(RequestError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(%endpoint, error = %e, "response was not the expected JSON");
            RequestError::from(e)
        })
    }
}

#[async_trait(?Send)]
impl RiskApi for HttpRiskClient {
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
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    /// Bind a stub backend on an ephemeral port and return its base URL
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn stub_backend() -> Router {
        Router::new()
            .route(
                "/heatmap-data",
                get(|| async { Json(json!([{"city": "Delhi", "risk": 0.91}, {"city": "Chennai", "risk": 0.4}])) }),
            )
            .route(
                "/trend",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    match params.get("city").map(String::as_str) {
                        Some("New Delhi") => Ok(Json(json!([
                            {"date": "2024-01-01", "risk_score": 0.5},
                            {"date": "2024-01-02", "risk_score": 0.6}
                        ]))),
                        _ => Err((StatusCode::NOT_FOUND, Json(json!({"detail": "City not found"})))),
                    }
                }),
            )
            .route("/summary", get(|| async { "<html>not json</html>" }))
            .route(
                "/predict-risk",
                post(|Json(body): Json<PredictionRequest>| async move {
                    Json(json!({"city": body.city, "date": body.date, "predicted_risk": 0.42}))
                }),
            )
            .route(
                "/cities/",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
                    let rows: Vec<_> = (0..limit)
                        .map(|i| json!({"id": i, "name": format!("City{}", i), "state": "S", "population": 1000, "base_risk": 0.5}))
                        .collect();
                    Json(rows)
                })
                .post(|Json(body): Json<NewCity>| async move {
                    Json(json!({
                        "id": 7,
                        "name": body.name,
                        "state": body.state,
                        "population": body.population,
                        "base_risk": body.base_risk,
                        "area_sq_km": body.area_sq_km,
                        "latitude": body.latitude,
                        "longitude": body.longitude
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn test_heatmap_data() {
        let base = spawn_stub(stub_backend()).await;
        let client = HttpRiskClient::with_base_url(base);

        let data = client.heatmap_data().await.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0], CityRisk::new("Delhi", 0.91));
    }

    #[tokio::test]
    async fn test_trend_encodes_city() {
        let base = spawn_stub(stub_backend()).await;
        let client = HttpRiskClient::with_base_url(base);

        let points = client.trend("New Delhi").await.unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].date, "2024-01-02");
    }

    #[tokio::test]
    async fn test_unknown_city_is_status_error() {
        let base = spawn_stub(stub_backend()).await;
        let client = HttpRiskClient::with_base_url(base);

        let err = client.trend("Atlantis").await.unwrap_err();
        assert!(matches!(err, RequestError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_non_json_is_decode_error() {
        let base = spawn_stub(stub_backend()).await;
        let client = HttpRiskClient::with_base_url(base);

        let err = client.summary().await.unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[tokio::test]
    async fn test_predict_posts_json() {
        let base = spawn_stub(stub_backend()).await;
        let client = HttpRiskClient::with_base_url(base);

        let result = client
            .predict_risk(&PredictionRequest::new("Paris", "2024-01-01"))
            .await
            .unwrap();
        assert_eq!(result.city, "Paris");
        assert_eq!(result.predicted_risk, 0.42);
    }

    #[tokio::test]
    async fn test_cities_pagination_params() {
        let base = spawn_stub(stub_backend()).await;
        let client = HttpRiskClient::with_base_url(base);

        let cities = client.cities(0, 3).await.unwrap();
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[2].name, "City2");
    }

    #[tokio::test]
    async fn test_create_city_posts_body() {
        let base = spawn_stub(stub_backend()).await;
        let client = HttpRiskClient::with_base_url(base);

        let city = NewCity {
            name: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            population: 7_000_000,
            base_risk: 0.4,
            area_sq_km: 331.0,
            latitude: 18.52,
            longitude: 73.86,
        };
        let record = client.create_city(&city).await.unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, "Pune");
        assert_eq!(record.area_sq_km, 331.0);
    }

    #[tokio::test]
    async fn test_slow_backend_hits_request_timeout() {
        let slow = Router::new().route(
            "/alerts",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"count": 0, "alerts": []}))
            }),
        );
        let base = spawn_stub(slow).await;
        let client = HttpRiskClient::new(&ApiConfig {
            base_url: base,
            request_timeout_secs: Some(1),
        })
        .unwrap();

        let err = client.alerts().await.unwrap_err();
        assert!(matches!(err, RequestError::Network(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind and drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpRiskClient::with_base_url(format!("http://{}", addr));
        let err = client.alerts().await.unwrap_err();
        assert!(matches!(err, RequestError::Network(_)));
    }

    #[test]
    fn test_new_trims_base_url() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            request_timeout_secs: Some(5),
        };
        let client = HttpRiskClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
