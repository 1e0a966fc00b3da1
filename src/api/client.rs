//! HTTP API Client
//!
//! Functions for communicating with the SIVEM REST API.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::state::global::Scenario;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("sivem_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("sivem_api_url", url);
        }
    }
}

/// URL of the static pre-processing report served next to the API
pub fn report_url(base: &str) -> String {
    format!("{}/incidentes_report.html", base.trim_end_matches('/'))
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct ProvinceListResponse {
    pub provinces: Vec<String>,
}

/// Forecast for a province/year pair. Optional fields stay `None` when the
/// backend omits them; the view renders those as "N/A".
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct ForecastResult {
    pub province: String,
    pub year: i32,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub prediction: Option<i64>,
    #[serde(default)]
    pub registered_cases_mean: Option<f64>,
    #[serde(default)]
    pub expected_counts: Option<ExpectedCounts>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct ExpectedCounts {
    #[serde(default)]
    pub baleamentos: f64,
    #[serde(default)]
    pub detencoes: f64,
    #[serde(default)]
    pub mortes: f64,
}

#[derive(Debug, serde::Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub prediction: Option<i64>,
}

/// Predict request body: the scenario fields merged with the province.
#[derive(Debug, serde::Serialize)]
struct PredictRequest {
    #[serde(flatten)]
    scenario: Scenario,
    province: String,
}

// ============ Request Discipline ============

/// Extract a user-visible message from a failed response.
///
/// Preference order: JSON body `detail`, then `error`, then a generic
/// `HTTP <status>` string. An empty or non-JSON body yields the generic form.
fn error_message(status: u16, body: &str) -> String {
    if !body.is_empty() {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(detail) = value.get("detail").and_then(|v| v.as_str()) {
                return detail.to_string();
            }
            if let Some(error) = value.get("error").and_then(|v| v.as_str()) {
                return error.to_string();
            }
        }
    }
    format!("HTTP {}", status)
}

/// Send a request and decode the JSON response.
///
/// The body is read as text first so failed responses can be mined for an
/// error message even when they are empty or not valid JSON. Transport
/// failures propagate with the transport's own message.
async fn send_json<T: DeserializeOwned>(request: Request) -> Result<T, String> {
    let response = request.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    let text = response.text().await.map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(error_message(status, &text));
    }

    serde_json::from_str(&text).map_err(|e| format!("Parse error: {}", e))
}

fn get_request(path: &str) -> Result<Request, String> {
    Request::get(&format!("{}{}", get_api_base(), path))
        .build()
        .map_err(|e| format!("Request build error: {}", e))
}

// ============ API Functions ============

/// Check API health
pub async fn fetch_health() -> Result<HealthResponse, String> {
    send_json(get_request("/health")?).await
}

/// Fetch the known province names
pub async fn fetch_provinces() -> Result<Vec<String>, String> {
    let result: ProvinceListResponse = send_json(get_request("/provinces")?).await?;
    Ok(result.provinces)
}

/// Request a historical forecast for a province/year pair
pub async fn fetch_forecast(province: &str, year: i32) -> Result<ForecastResult, String> {
    #[derive(serde::Serialize)]
    struct ForecastRequest {
        province: String,
        year: i32,
    }

    let request = Request::post(&format!("{}/forecast", get_api_base()))
        .json(&ForecastRequest {
            province: province.to_string(),
            year,
        })
        .map_err(|e| format!("Request build error: {}", e))?;

    send_json(request).await
}

/// Run a scenario prediction for a province
pub async fn fetch_predict(scenario: &Scenario, province: &str) -> Result<PredictResponse, String> {
    let request = Request::post(&format!("{}/predict", get_api_base()))
        .json(&PredictRequest {
            scenario: scenario.clone(),
            province: province.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?;

    send_json(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_detail() {
        let body = r#"{"detail": "provincia desconhecida", "error": "other"}"#;
        assert_eq!(error_message(422, body), "provincia desconhecida");
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        let body = r#"{"error": "modelo indisponivel"}"#;
        assert_eq!(error_message(503, body), "modelo indisponivel");
    }

    #[test]
    fn test_error_message_generic_when_fields_absent() {
        assert_eq!(error_message(500, r#"{"message": "nope"}"#), "HTTP 500");
        assert_eq!(error_message(502, ""), "HTTP 502");
        assert_eq!(error_message(404, "<html>not json</html>"), "HTTP 404");
    }

    #[test]
    fn test_forecast_result_tolerates_missing_fields() {
        let json = r#"{"province": "Gaza", "year": 2024}"#;
        let result: ForecastResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.province, "Gaza");
        assert_eq!(result.year, 2024);
        assert!(result.probability.is_none());
        assert!(result.prediction.is_none());
        assert!(result.registered_cases_mean.is_none());
        assert!(result.expected_counts.is_none());
    }

    #[test]
    fn test_forecast_result_full_payload() {
        let json = r#"{
            "province": "Sofala",
            "year": 2025,
            "probability": 0.72,
            "prediction": 1,
            "registered_cases_mean": 4.25,
            "expected_counts": {"baleamentos": 2.0, "detencoes": 1.5, "mortes": 0.0}
        }"#;
        let result: ForecastResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.probability, Some(0.72));
        assert_eq!(result.prediction, Some(1));
        let counts = result.expected_counts.unwrap();
        assert_eq!(counts.baleamentos, 2.0);
        assert_eq!(counts.detencoes, 1.5);
    }

    #[test]
    fn test_predict_request_merges_scenario_and_province() {
        let body = PredictRequest {
            scenario: Scenario {
                registered_cases: 5,
                baleamentos: 1,
                detencoes: 0,
                mortes: 0,
            },
            province: "Gaza".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["registered_cases"], 5);
        assert_eq!(value["baleamentos"], 1);
        assert_eq!(value["detencoes"], 0);
        assert_eq!(value["mortes"], 0);
        assert_eq!(value["province"], "Gaza");
    }

    #[test]
    fn test_report_url_normalizes_trailing_slash() {
        assert_eq!(
            report_url("http://127.0.0.1:8000/"),
            "http://127.0.0.1:8000/incidentes_report.html"
        );
        assert_eq!(
            report_url("http://localhost:8000"),
            "http://localhost:8000/incidentes_report.html"
        );
    }
}
