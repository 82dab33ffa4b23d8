//! Core data types for the risk dashboard
//!
//! Every type here is a response or request payload of the risk backend:
//! - `CityRisk`: a city and its current risk score
//! - `RiskTier`: the low/medium/high bucket derived from a score
//! - `TrendPoint`: one dated score in a city's trend series
//! - `SummaryStats`, `AlertSet`: aggregate payloads
//! - `PredictionRequest` / `PredictionResult`: the predict round trip
//! - `CityRecord`: a row of the backend's city listing
//! - `NewCity`: the body of a city registration
//!
//! None of these are cached; they live for a single render.

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the high tier
pub const HIGH_RISK_THRESHOLD: f64 = 0.8;

/// Lower bound (inclusive) of the medium tier
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.5;

/// A city together with its current risk score in [0, 1]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityRisk {
    pub city: String,
    pub risk: f64,
}

impl CityRisk {
    pub fn new(city: impl Into<String>, risk: f64) -> Self {
        Self {
            city: city.into(),
            risk,
        }
    }

    /// Tier this score falls into
    pub fn tier(&self) -> RiskTier {
        RiskTier::classify(self.risk)
    }
}

/// Display bucket for a risk score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classify a score. Both thresholds are inclusive lower bounds, so
    /// 0.8 is high and 0.5 is medium.
    pub fn classify(risk: f64) -> Self {
        if risk >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if risk >= MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Class name used by rendered elements
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Fill color for charts and cells
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "#4CAF50",
            RiskTier::Medium => "#FF9800",
            RiskTier::High => "#F44336",
        }
    }

    pub fn all() -> &'static [RiskTier] {
        &[RiskTier::Low, RiskTier::Medium, RiskTier::High]
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.css_class())
    }
}

/// One dated score of a city's trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    pub risk_score: f64,
}

impl TrendPoint {
    pub fn new(date: impl Into<String>, risk_score: f64) -> Self {
        Self {
            date: date.into(),
            risk_score,
        }
    }
}

/// Aggregate statistics across all cities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub highest_risk_city: CityRisk,
    pub average_risk: f64,
    pub total_cities: u32,
}

/// Cities currently over the backend's alert threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertSet {
    pub count: u32,
    #[serde(default)]
    pub alerts: Vec<CityRisk>,
}

impl AlertSet {
    pub fn empty() -> Self {
        Self {
            count: 0,
            alerts: Vec::new(),
        }
    }
}

/// Body of `POST /predict-risk`
///
/// Values are forwarded exactly as entered; the backend owns validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub city: String,
    /// Expected as YYYY-MM-DD by the backend
    pub date: String,
}

impl PredictionRequest {
    pub fn new(city: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            date: date.into(),
        }
    }
}

/// Response of `POST /predict-risk`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub city: String,
    pub date: String,
    pub predicted_risk: f64,
}

/// A city row from `GET /cities/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityRecord {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub population: i64,
    pub base_risk: f64,
    #[serde(default = "default_area")]
    pub area_sq_km: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

fn default_area() -> f64 {
    1000.0
}

/// Body of `POST /cities/`; the backend answers with the stored [`CityRecord`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCity {
    pub name: String,
    pub state: String,
    pub population: i64,
    pub base_risk: f64,
    #[serde(default = "default_area")]
    pub area_sq_km: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl CityRecord {
    /// People per square kilometre
    pub fn density(&self) -> f64 {
        if self.area_sq_km <= 0.0 {
            return 0.0;
        }
        self.population as f64 / self.area_sq_km
    }
}
