//! State Management

pub mod global;

pub use global::{provide_dashboard_state, use_dashboard_state, DashboardState};
