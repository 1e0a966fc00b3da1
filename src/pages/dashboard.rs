//! Dashboard Page
//!
//! Single-page view: health status, forecast form, scenario analysis and
//! result panels.

use leptos::*;

use crate::api;
use crate::components::{BarChart, BarDatum, RiskBadge};
use crate::state::global::{require_province, GlobalState, STATUS_CHECKING, STATUS_ERROR, STATUS_OK};

/// Probability with three decimals, "N/A" when absent
fn format_probability(probability: Option<f64>) -> String {
    probability
        .map(|p| format!("{:.3}", p))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Mean registered cases with two decimals, "N/A" when absent
fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| format!("{:.2}", m))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Binary prediction, "N/A" when absent
fn format_prediction(prediction: Option<i64>) -> String {
    prediction
        .map(|p| p.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Run the health check and store the outcome
async fn load_health(state: GlobalState) {
    match api::fetch_health().await {
        Ok(health) => {
            state.status.set(health.status);
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Health check failed: {}", e).into());
            state.status.set(STATUS_ERROR.to_string());
        }
    }
}

/// Fetch the province list, falling back to the defaults on failure
async fn load_provinces(state: GlobalState) {
    state.loading_provinces.set(true);
    match api::fetch_provinces().await {
        Ok(provinces) => {
            state.apply_province_list(provinces);
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to fetch provinces: {}", e).into());
            state.apply_province_list(Vec::new());
        }
    }
    state.loading_provinces.set(false);
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch health and provinces on mount, concurrently
    let state_for_effect = state.clone();
    create_effect(move |_| {
        spawn_local(load_health(state_for_effect.clone()));
        spawn_local(load_provinces(state_for_effect.clone()));
    });

    let state_for_forecast = state.clone();
    let on_forecast = move |_| {
        let state = state_for_forecast.clone();
        state.error.set(None);
        state.result.set(None);

        let province = state.province.get();
        if let Err(e) = require_province(&province) {
            state.error.set(Some(e));
            return;
        }

        let year = state.year.get();
        spawn_local(async move {
            state.loading_forecast.set(true);
            match api::fetch_forecast(&province, year).await {
                Ok(result) => {
                    state.result.set(Some(result));
                }
                Err(e) => {
                    state.error.set(Some(e));
                }
            }
            state.loading_forecast.set(false);
        });
    };

    let state_for_predict = state.clone();
    let on_predict = move |_| {
        let state = state_for_predict.clone();
        // Keep the previous result visible until the new one arrives
        state.error.set(None);

        let province = state.province.get();
        if let Err(e) = require_province(&province) {
            state.error.set(Some(e));
            return;
        }

        let scenario = state.scenario.get();
        spawn_local(async move {
            state.loading_predict.set(true);
            match api::fetch_predict(&scenario, &province).await {
                Ok(response) => {
                    let result =
                        state.synthesize_predict_result(response.probability, response.prediction);
                    state.result.set(Some(result));
                }
                Err(e) => {
                    state.error.set(Some(e));
                }
            }
            state.loading_predict.set(false);
        });
    };

    let state_for_reload = state.clone();
    let on_reload = move |_| {
        let state = state_for_reload.clone();
        state.status.set(STATUS_CHECKING.to_string());
        spawn_local(load_health(state.clone()));
        spawn_local(load_provinces(state));
    };

    let open_report = move |_| {
        let url = api::report_url(&api::get_api_base());
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(&url, "_blank");
        }
    };

    let status = state.status;
    view! {
        <div class="space-y-8">
            // Page header with API status and global actions
            <div>
                <h1 class="text-3xl font-bold">"SIVEM Dashboard"</h1>
                <p class="text-gray-400 mt-1 flex items-center space-x-2">
                    <span>"API status: " {move || status.get()}</span>
                    <button
                        on:click=on_reload
                        class="ml-2 px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm
                               text-white transition-colors"
                    >
                        "Recarregar"
                    </button>
                    <button
                        on:click=open_report
                        class="ml-2 px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm
                               text-white transition-colors"
                    >
                        "Relatório pré-processamento"
                    </button>
                </p>
            </div>

            // Forecast form
            <ForecastForm on_forecast=on_forecast />

            // Result panels
            <div class="grid md:grid-cols-2 gap-8">
                <HistoricalForecastPanel />

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Análise de cenário"</h2>
                    <ScenarioForm on_predict=on_predict />
                </section>
            </div>

            // Raw model output
            <DetailsPanel />

            // Last failure, if any
            <ErrorLine />

            // Base URL override
            <ApiSettings />
        </div>
    }
}

/// API connection settings: shows the configured base URL and persists an
/// override in local storage, then re-checks health and provinces.
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        state.status.set(STATUS_CHECKING.to_string());
        spawn_local(load_health(state.clone()));
        spawn_local(load_provinces(state.clone()));
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Ligação à API"</h2>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=save_url
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                           rounded-lg font-medium transition-colors"
                >
                    "Guardar"
                </button>
            </div>
        </section>
    }
}

/// Province/year selection and the forecast trigger
#[component]
fn ForecastForm(on_forecast: impl Fn(web_sys::MouseEvent) + 'static) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Signals are Copy, so each closure can take its own
    let provinces = state.provinces;
    let province = state.province;
    let year = state.year;
    let loading_provinces = state.loading_provinces;
    let loading_forecast = state.loading_forecast;
    let status = state.status;

    view! {
        <div class="flex flex-wrap items-center gap-4">
            <label class="flex items-center space-x-2">
                <span class="text-sm text-gray-400">"Província"</span>
                <select
                    on:change=move |ev| province.set(event_target_value(&ev))
                    prop:value=move || province.get()
                    disabled=move || loading_provinces.get()
                    class="bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                >
                    <option value="">"Selecione"</option>
                    {move || {
                        provinces
                            .get()
                            .into_iter()
                            .map(|p| view! { <option value=p.clone()>{p}</option> })
                            .collect_view()
                    }}
                </select>
            </label>

            <label class="flex items-center space-x-2">
                <span class="text-sm text-gray-400">"Ano"</span>
                <input
                    type="number"
                    prop:value=move || year.get().to_string()
                    on:input=move |ev| {
                        if let Ok(y) = event_target_value(&ev).parse() {
                            year.set(y);
                        }
                    }
                    class="w-24 bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                />
            </label>

            <button
                on:click=on_forecast
                disabled=move || loading_forecast.get() || status.get() != STATUS_OK
                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg font-medium transition-colors"
            >
                {move || {
                    if loading_forecast.get() { "A gerar..." } else { "Gerar previsão" }
                }}
            </button>
        </div>
    }
}

/// Panel showing the stored forecast result
#[component]
fn HistoricalForecastPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Previsão por histórico"</h2>
            {move || {
                state
                    .result
                    .get()
                    .map(|result| {
                        let counts = result.expected_counts.clone();
                        view! {
                            <div class="space-y-2">
                                <div>"Província: " {result.province.clone()}</div>
                                <div>"Ano: " {result.year}</div>
                                <div class="flex items-center space-x-2">
                                    <span>"Risco:"</span>
                                    <RiskBadge probability=result.probability />
                                </div>
                                <div>
                                    "Casos médios registados: "
                                    {format_mean(result.registered_cases_mean)}
                                </div>
                                {counts
                                    .map(|c| view! {
                                        <div>
                                            <h3 class="font-semibold mt-4 mb-2">
                                                "Contagens esperadas"
                                            </h3>
                                            <BarChart data=vec![
                                                BarDatum::new("Baleamentos", c.baleamentos),
                                                BarDatum::new("Detenções", c.detencoes),
                                                BarDatum::new("Mortes", c.mortes),
                                            ] />
                                        </div>
                                    })}
                            </div>
                        }
                    })
            }}
        </section>
    }
}

/// Scenario input vector and the predict trigger
#[component]
fn ScenarioForm(on_predict: impl Fn(web_sys::MouseEvent) + 'static) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let scenario = state.scenario;
    let loading_predict = state.loading_predict;
    let status = state.status;

    view! {
        <div class="flex flex-wrap items-center gap-4">
            <label class="flex items-center space-x-2">
                <span class="text-sm text-gray-400">"Casos"</span>
                <input
                    type="number"
                    min="0"
                    prop:value=move || scenario.get().registered_cases.to_string()
                    on:input=move |ev| {
                        if let Ok(cases) = event_target_value(&ev).parse() {
                            scenario.update(|s| s.registered_cases = cases);
                        }
                    }
                    class="w-24 bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                />
            </label>

            <ScenarioToggle
                label="Baleamentos"
                read=Signal::derive(move || scenario.get().baleamentos == 1)
                write=move |on| scenario.update(|s| s.baleamentos = u8::from(on))
            />
            <ScenarioToggle
                label="Detenções"
                read=Signal::derive(move || scenario.get().detencoes == 1)
                write=move |on| scenario.update(|s| s.detencoes = u8::from(on))
            />
            <ScenarioToggle
                label="Mortes"
                read=Signal::derive(move || scenario.get().mortes == 1)
                write=move |on| scenario.update(|s| s.mortes = u8::from(on))
            />

            <button
                on:click=on_predict
                disabled=move || loading_predict.get() || status.get() != STATUS_OK
                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg font-medium transition-colors"
            >
                {move || {
                    if loading_predict.get() { "A calcular..." } else { "Calcular risco" }
                }}
            </button>
        </div>
    }
}

/// One 0/1 incident toggle of the scenario vector
#[component]
fn ScenarioToggle(
    label: &'static str,
    #[prop(into)] read: Signal<bool>,
    write: impl Fn(bool) + 'static,
) -> impl IntoView {
    view! {
        <label class="flex items-center space-x-2">
            <span class="text-sm text-gray-400">{label}</span>
            <input
                type="checkbox"
                prop:checked=move || read.get()
                on:change=move |ev| write(event_target_checked(&ev))
                class="w-4 h-4"
            />
        </label>
    }
}

/// Raw probability and binary prediction of the stored result
#[component]
fn DetailsPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            state
                .result
                .get()
                .map(|result| view! {
                    <section class="bg-gray-800 rounded-xl p-6">
                        <h2 class="text-xl font-semibold mb-4">"Detalhes"</h2>
                        <div class="space-y-1">
                            <div>
                                "Probabilidade (modelo): "
                                {format_probability(result.probability)}
                            </div>
                            <div>
                                "Previsão binária: "
                                {format_prediction(result.prediction)}
                            </div>
                        </div>
                    </section>
                })
        }}
    }
}

/// Inline error message for the last failed action
#[component]
fn ErrorLine() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            state
                .error
                .get()
                .map(|e| view! {
                    <div class="text-red-400">"Erro: " {e}</div>
                })
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(Some(0.42)), "0.420");
        assert_eq!(format_probability(Some(0.1234)), "0.123");
        assert_eq!(format_probability(None), "N/A");
    }

    #[test]
    fn test_format_mean() {
        assert_eq!(format_mean(Some(4.256)), "4.26");
        assert_eq!(format_mean(None), "N/A");
    }

    #[test]
    fn test_format_prediction() {
        assert_eq!(format_prediction(Some(1)), "1");
        assert_eq!(format_prediction(Some(0)), "0");
        assert_eq!(format_prediction(None), "N/A");
    }
}
