//! Risk Backend Client
//!
//! The `RiskApi` trait is the single seam between panels and the network.
//! The native build talks to the backend through [`HttpRiskClient`]; the
//! browser dashboard supplies its own implementation over `fetch`.
//!
//! Both implementations build URLs from the same [`Endpoint`] table so the
//! paths and query encoding cannot drift apart.

#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use http::HttpRiskClient;

use async_trait::async_trait;

use crate::error::RequestResult;
use crate::model::{AlertSet, CityRecord, CityRisk, NewCity, PredictionRequest, PredictionResult, SummaryStats, TrendPoint};

/// Backend endpoints consumed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    HeatmapData,
    Trend,
    Summary,
    Alerts,
    CityInfo,
    PredictRisk,
    Cities,
    CreateCity,
}

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::HeatmapData => "/heatmap-data",
            Endpoint::Trend => "/trend",
            Endpoint::Summary => "/summary",
            Endpoint::Alerts => "/alerts",
            Endpoint::CityInfo => "/city-info",
            Endpoint::PredictRisk => "/predict-risk",
            Endpoint::Cities | Endpoint::CreateCity => "/cities/",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::PredictRisk | Endpoint::CreateCity => Method::Post,
            _ => Method::Get,
        }
    }

    /// Absolute URL for this endpoint with percent-encoded query parameters
    pub fn url(&self, base: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", base.trim_end_matches('/'), self.path());

        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Typed access to the risk backend
///
/// Futures are not required to be `Send`: the dashboard runs on a single
/// cooperative event loop, and browser futures cannot be sent anyway.
#[async_trait(?Send)]
pub trait RiskApi {
    /// `GET /heatmap-data`
    async fn heatmap_data(&self) -> RequestResult<Vec<CityRisk>>;

    /// `GET /trend?city=`
    async fn trend(&self, city: &str) -> RequestResult<Vec<TrendPoint>>;

    /// `GET /summary`
    async fn summary(&self) -> RequestResult<SummaryStats>;

    /// `GET /alerts`
    async fn alerts(&self) -> RequestResult<AlertSet>;

    /// `GET /city-info?city=`, an opaque payload
    async fn city_info(&self, city: &str) -> RequestResult<serde_json::Value>;

    /// `POST /predict-risk`
    async fn predict_risk(&self, request: &PredictionRequest) -> RequestResult<PredictionResult>;

    /// `GET /cities/?skip=&limit=`
    async fn cities(&self, skip: u32, limit: u32) -> RequestResult<Vec<CityRecord>>;

    /// `POST /cities/`, answered with the stored record
    async fn create_city(&self, city: &NewCity) -> RequestResult<CityRecord>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_methods() {
        assert_eq!(Endpoint::PredictRisk.method(), Method::Post);
        assert_eq!(Endpoint::Trend.method(), Method::Get);
        assert_eq!(Endpoint::Cities.path(), "/cities/");
        assert_eq!(Endpoint::CreateCity.method(), Method::Post);
        assert_eq!(Endpoint::CreateCity.path(), Endpoint::Cities.path());
    }

    #[test]
    fn test_url_without_query() {
        let url = Endpoint::Summary.url("http://localhost:8000/", &[]);
        assert_eq!(url, "http://localhost:8000/summary");
    }

    #[test]
    fn test_url_encodes_query() {
        let url = Endpoint::Trend.url("http://localhost:8000", &[("city", "New Delhi&x=1")]);
        assert_eq!(url, "http://localhost:8000/trend?city=New%20Delhi%26x%3D1");

        let url = Endpoint::Cities.url("http://h", &[("skip", "0"), ("limit", "10")]);
        assert_eq!(url, "http://h/cities/?skip=0&limit=10");
    }
}
