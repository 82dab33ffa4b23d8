//! Prediction form
//!
//! Idle until a submission, then awaiting a response, then settled. City
//! and date go to the backend exactly as typed; there is no client-side
//! validation. Each submission replaces the previous result, and only the
//! latest submission may settle the panel.

use serde::Serialize;
use std::sync::Mutex;

use super::{lock, PanelState};
use crate::client::RiskApi;
use crate::model::{PredictionRequest, PredictionResult};
use crate::sequence::Sequencer;

/// Fixed text shown when a prediction cannot be fetched
pub const PREDICTION_FAILURE: &str = "Error fetching prediction.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum PredictionView {
    Empty,
    Result(String),
    Notice(String),
}

pub fn result_text(result: &PredictionResult) -> String {
    format!(
        "Predicted Risk for {} on {}: {}",
        result.city, result.date, result.predicted_risk
    )
}

/// Awaiting-response shows nothing: the previous result is already
/// cleared and no loading indicator exists.
pub fn render(state: &PanelState<PredictionResult>) -> PredictionView {
    match state {
        PanelState::Idle | PanelState::Loading => PredictionView::Empty,
        PanelState::Ready(result) => PredictionView::Result(result_text(result)),
        PanelState::Failed(_) => PredictionView::Notice(PREDICTION_FAILURE.to_string()),
    }
}

#[derive(Debug, Default)]
pub struct PredictionForm {
    state: Mutex<PanelState<PredictionResult>>,
    sequencer: Sequencer,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a form submission
    ///
    /// Returns `None` when a newer submission superseded this one before
    /// its response arrived.
    pub async fn submit<A: RiskApi + ?Sized>(
        &self,
        api: &A,
        city: &str,
        date: &str,
    ) -> Option<PredictionView> {
        let ticket = self.sequencer.issue();
        *lock(&self.state) = PanelState::Loading;

        let request = PredictionRequest::new(city, date);
        let result = api.predict_risk(&request).await;

        if !ticket.is_current() {
            tracing::debug!(city = %city, ticket = ticket.id(), "discarding superseded prediction");
            return None;
        }

        match &result {
            Ok(r) => tracing::info!(city = %r.city, date = %r.date, risk = r.predicted_risk, "prediction received"),
            Err(e) => tracing::error!(city = %city, date = %date, error = %e, "prediction failed"),
        }

        let state = PanelState::from_result(result);
        let view = render(&state);
        *lock(&self.state) = state;
        Some(view)
    }

    pub fn is_awaiting(&self) -> bool {
        lock(&self.state).is_loading()
    }

    pub fn state(&self) -> PanelState<PredictionResult> {
        lock(&self.state).clone()
    }

    pub fn view(&self) -> PredictionView {
        render(&lock(&self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;
    use crate::error::RequestResult;
    use crate::model::{AlertSet, CityRecord, CityRisk, NewCity, SummaryStats, TrendPoint};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_submit_renders_predicted_risk() {
        let api = FakeApi {
            prediction: Some(PredictionResult {
                city: "Paris".to_string(),
                date: "2024-01-01".to_string(),
                predicted_risk: 0.42,
            }),
            ..Default::default()
        };
        let form = PredictionForm::new();

        let view = form.submit(&api, "Paris", "2024-01-01").await.unwrap();
        let PredictionView::Result(text) = view else {
            panic!("expected result");
        };
        assert!(text.contains("0.42"));
        assert_eq!(api.calls(), vec!["predict:Paris:2024-01-01".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_inputs_are_forwarded() {
        let api = FakeApi::default();
        let form = PredictionForm::new();

        let view = form.submit(&api, "", "").await.unwrap();
        assert_eq!(api.calls(), vec!["predict::".to_string()]);
        assert_eq!(view, PredictionView::Notice(PREDICTION_FAILURE.to_string()));
    }

    #[tokio::test]
    async fn test_failure_replaces_prior_result() {
        let form = PredictionForm::new();
        let api = FakeApi {
            prediction: Some(PredictionResult {
                city: "Delhi".to_string(),
                date: "2024-06-01".to_string(),
                predicted_risk: 0.88,
            }),
            ..Default::default()
        };
        form.submit(&api, "Delhi", "2024-06-01").await;
        assert!(matches!(form.view(), PredictionView::Result(_)));

        form.submit(&FakeApi::default(), "Delhi", "bad-date").await;
        assert_eq!(form.view(), PredictionView::Notice(PREDICTION_FAILURE.to_string()));
        assert!(!form.is_awaiting());
    }

    /// Backend whose predictions are released by the test, one gate per city
    struct GatedPredictions {
        gates: Mutex<HashMap<String, (oneshot::Receiver<()>, f64)>>,
    }

    #[async_trait(?Send)]
    impl RiskApi for GatedPredictions {
        async fn heatmap_data(&self) -> RequestResult<Vec<CityRisk>> {
            unimplemented!()
        }

        async fn trend(&self, _city: &str) -> RequestResult<Vec<TrendPoint>> {
            unimplemented!()
        }

        async fn summary(&self) -> RequestResult<SummaryStats> {
            unimplemented!()
        }

        async fn alerts(&self) -> RequestResult<AlertSet> {
            unimplemented!()
        }

        async fn city_info(&self, _city: &str) -> RequestResult<serde_json::Value> {
            unimplemented!()
        }

        async fn predict_risk(&self, request: &PredictionRequest) -> RequestResult<PredictionResult> {
            let (gate, risk) = self.gates.lock().unwrap().remove(&request.city).unwrap();
            gate.await.unwrap();
            Ok(PredictionResult {
                city: request.city.clone(),
                date: request.date.clone(),
                predicted_risk: risk,
            })
        }

        async fn cities(&self, _skip: u32, _limit: u32) -> RequestResult<Vec<CityRecord>> {
            unimplemented!()
        }

        async fn create_city(&self, _city: &NewCity) -> RequestResult<CityRecord> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_latest_submission_wins() {
        let (release_a, gate_a) = oneshot::channel();
        let (release_b, gate_b) = oneshot::channel();
        let api = GatedPredictions {
            gates: Mutex::new(
                [("A".to_string(), (gate_a, 0.1)), ("B".to_string(), (gate_b, 0.9))]
                    .into_iter()
                    .collect(),
            ),
        };
        let form = PredictionForm::new();

        // B resolves first, then the older A response arrives
        let driver = async {
            tokio::task::yield_now().await;
            assert!(form.is_awaiting());
            release_b.send(()).unwrap();
            tokio::task::yield_now().await;
            release_a.send(()).unwrap();
        };
        let (a, b, ()) = tokio::join!(
            form.submit(&api, "A", "2024-01-01"),
            form.submit(&api, "B", "2024-01-01"),
            driver
        );

        assert_eq!(a, None);
        let Some(PredictionView::Result(text)) = b else {
            panic!("expected result for B");
        };
        assert!(text.contains("0.9"));
        assert_eq!(form.view(), PredictionView::Result(text));
        let state = form.state();
        assert_eq!(state.ready().map(|r| r.city.as_str()), Some("B"));
    }
}
