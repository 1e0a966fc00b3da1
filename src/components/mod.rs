//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod bar_chart;
pub mod risk_badge;

pub use bar_chart::{BarChart, BarDatum};
pub use risk_badge::RiskBadge;
