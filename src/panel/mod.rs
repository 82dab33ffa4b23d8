//! Dashboard Panels
//!
//! Each panel is an independently fetched, independently rendered region.
//! All of them share one lifecycle, [`PanelState`], and each has exactly
//! one rendering rule that turns its state into a view:
//!
//! - [`heatmap`]: one cell per city, tiered and clickable
//! - [`trend`]: the single trend chart
//! - [`summary`]: highest-risk city, average risk, city count
//! - [`alerts`]: banner of high-risk cities
//! - [`prediction`]: result of the predict form
//!
//! Views are plain data. The browser dashboard turns them into DOM nodes,
//! the CLI into text.

pub mod alerts;
pub mod heatmap;
pub mod prediction;
pub mod summary;
pub mod trend;

use serde::Serialize;

use crate::error::RequestResult;

/// Lifecycle of a panel's data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum PanelState<T> {
    /// Nothing requested yet
    Idle,
    /// Request in flight
    Loading,
    /// Last request succeeded
    Ready(T),
    /// Last request failed; carries the error text for logs
    Failed(String),
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        PanelState::Idle
    }
}

impl<T> PanelState<T> {
    /// Settle a finished request
    pub fn from_result(result: RequestResult<T>) -> Self {
        match result {
            Ok(data) => PanelState::Ready(data),
            Err(e) => PanelState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PanelState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Lock a panel mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;

    #[test]
    fn test_from_result() {
        let ok: PanelState<u32> = PanelState::from_result(Ok(3));
        assert_eq!(ok.ready(), Some(&3));

        let failed: PanelState<u32> =
            PanelState::from_result(Err(RequestError::Network("down".to_string())));
        assert!(failed.is_failed());
        assert_eq!(failed, PanelState::Failed("Network error: down".to_string()));
    }

    #[test]
    fn test_default_is_idle() {
        let state: PanelState<String> = PanelState::default();
        assert_eq!(state, PanelState::Idle);
        assert!(!state.is_loading());
    }
}
