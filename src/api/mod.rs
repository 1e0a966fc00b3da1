//! API Layer
//!
//! HTTP client for the SIVEM prediction service.

pub mod client;

pub use client::{
    fetch_forecast, fetch_health, fetch_predict, fetch_provinces, get_api_base, report_url,
    set_api_base, ForecastResult, HealthResponse, PredictResponse,
};
