//! Global Application State
//!
//! Reactive state management using Leptos signals.

use chrono::Datelike;
use leptos::*;

use crate::api::ForecastResult;

/// Health status shown while the initial check is in flight
pub const STATUS_CHECKING: &str = "...";
/// Health status stored when the check fails
pub const STATUS_ERROR: &str = "erro";
/// Health status required before forecast/predict actions are enabled
pub const STATUS_OK: &str = "ok";

/// Fallback province list used when the backend returns none
pub const DEFAULT_PROVINCES: [&str; 11] = [
    "Cabo Delgado",
    "Gaza",
    "Inhambane",
    "Manica",
    "Maputo",
    "Maputo Provincia",
    "Nampula",
    "Niassa",
    "Sofala",
    "Tete",
    "Zambezia",
];

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Last health-check outcome ("...", "ok" or "erro")
    pub status: RwSignal<String>,
    /// Province names offered in the selector
    pub provinces: RwSignal<Vec<String>>,
    /// Currently selected province, empty when unselected
    pub province: RwSignal<String>,
    /// Year for forecasts
    pub year: RwSignal<i32>,
    /// Scenario input vector for predictions
    pub scenario: RwSignal<Scenario>,
    /// Last successful forecast/predict response
    pub result: RwSignal<Option<ForecastResult>>,
    /// Last failure message
    pub error: RwSignal<Option<String>>,
    /// Province fetch in progress
    pub loading_provinces: RwSignal<bool>,
    /// Forecast request in progress
    pub loading_forecast: RwSignal<bool>,
    /// Predict request in progress
    pub loading_predict: RwSignal<bool>,
}

/// Hypothetical input vector sent to the predict endpoint.
///
/// The three incident toggles are 0/1 flags, matching the wire format the
/// backend model was trained on.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scenario {
    pub registered_cases: u32,
    pub baleamentos: u8,
    pub detencoes: u8,
    pub mortes: u8,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            registered_cases: 5,
            baleamentos: 1,
            detencoes: 0,
            mortes: 0,
        }
    }
}

/// Use the fetched province list unless it is empty
pub fn province_list_or_default(provinces: Vec<String>) -> Vec<String> {
    if provinces.is_empty() {
        default_provinces()
    } else {
        provinces
    }
}

/// Owned copy of the fallback list
pub fn default_provinces() -> Vec<String> {
    DEFAULT_PROVINCES.iter().map(|p| p.to_string()).collect()
}

/// Validate the province selection before issuing a request
pub fn require_province(province: &str) -> Result<(), String> {
    if province.is_empty() {
        Err("Selecione a provincia".to_string())
    } else {
        Ok(())
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        status: create_rw_signal(STATUS_CHECKING.to_string()),
        provinces: create_rw_signal(Vec::new()),
        province: create_rw_signal(String::new()),
        year: create_rw_signal(chrono::Utc::now().year()),
        scenario: create_rw_signal(Scenario::default()),
        result: create_rw_signal(None),
        error: create_rw_signal(None),
        loading_provinces: create_rw_signal(false),
        loading_forecast: create_rw_signal(false),
        loading_predict: create_rw_signal(false),
    };

    provide_context(state);
}

impl GlobalState {
    /// Store the province list, falling back to the defaults when empty
    pub fn apply_province_list(&self, provinces: Vec<String>) {
        self.provinces.set(province_list_or_default(provinces));
    }

    /// Build the displayed result for a scenario prediction.
    ///
    /// Only probability and prediction come from the response; province and
    /// year reflect the current form selection, everything else is absent.
    pub fn synthesize_predict_result(
        &self,
        probability: Option<f64>,
        prediction: Option<i64>,
    ) -> ForecastResult {
        ForecastResult {
            province: self.province.get_untracked(),
            year: self.year.get_untracked(),
            probability,
            prediction,
            registered_cases_mean: None,
            expected_counts: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        assert_eq!(scenario.registered_cases, 5);
        assert_eq!(scenario.baleamentos, 1);
        assert_eq!(scenario.detencoes, 0);
        assert_eq!(scenario.mortes, 0);
    }

    #[test]
    fn test_province_list_or_default_empty() {
        let list = province_list_or_default(Vec::new());
        assert_eq!(list.len(), 11);
        assert_eq!(list[0], "Cabo Delgado");
        assert_eq!(list[10], "Zambezia");
    }

    #[test]
    fn test_province_list_or_default_keeps_fetched() {
        let fetched = vec!["Gaza".to_string(), "Tete".to_string()];
        assert_eq!(province_list_or_default(fetched.clone()), fetched);
    }

    #[test]
    fn test_require_province() {
        assert_eq!(require_province(""), Err("Selecione a provincia".to_string()));
        assert!(require_province("Gaza").is_ok());
    }
}
