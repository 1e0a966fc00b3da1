//! Bar Chart Component
//!
//! Horizontal bar chart for expected incident counts.

use leptos::*;

/// A single labelled bar
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

impl BarDatum {
    pub fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Largest value in the data set, floored at 1 so an all-zero set still has
/// a usable scale.
fn max_value(data: &[BarDatum]) -> f64 {
    data.iter().map(|d| d.value).fold(1.0, f64::max)
}

/// Bar width as a percentage of the chart area
fn width_percent(value: f64, max: f64) -> f64 {
    value / max * 100.0
}

/// Horizontal bar chart component. Pure function of its props.
#[component]
pub fn BarChart(data: Vec<BarDatum>) -> impl IntoView {
    let max = max_value(&data);

    view! {
        <div class="grid gap-2">
            {data
                .into_iter()
                .map(|datum| {
                    let width = width_percent(datum.value, max);
                    view! {
                        <div class="flex items-center gap-2">
                            <div class="w-36 text-sm text-gray-300">{datum.label}</div>
                            <div class="flex-1 bg-gray-700 h-4 rounded overflow-hidden">
                                <div
                                    class="h-full bg-green-500"
                                    style=format!("width: {}%", width)
                                />
                            </div>
                            <div class="w-12 text-right text-sm">
                                {format!("{}", datum.value)}
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_value_floors_at_one() {
        let data = vec![BarDatum::new("A", 0.0), BarDatum::new("B", 0.0)];
        assert_eq!(max_value(&data), 1.0);
        assert_eq!(max_value(&[]), 1.0);
    }

    #[test]
    fn test_all_zero_bars_render_at_zero_width() {
        let data = vec![BarDatum::new("A", 0.0), BarDatum::new("B", 0.0)];
        let max = max_value(&data);
        for datum in &data {
            assert_eq!(width_percent(datum.value, max), 0.0);
        }
    }

    #[test]
    fn test_widths_scale_to_largest_value() {
        let data = vec![BarDatum::new("A", 2.0), BarDatum::new("B", 8.0)];
        let max = max_value(&data);
        assert_eq!(width_percent(data[0].value, max), 25.0);
        assert_eq!(width_percent(data[1].value, max), 100.0);
    }

    #[test]
    fn test_fractional_values_below_one_keep_unit_scale() {
        let data = vec![BarDatum::new("A", 0.5)];
        assert_eq!(max_value(&data), 1.0);
        assert_eq!(width_percent(0.5, 1.0), 50.0);
    }
}
