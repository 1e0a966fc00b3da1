//! Risk Badge Component
//!
//! Three-tier visual classification of a probability value.

use leptos::*;

/// Risk tier derived from a probability
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unavailable,
}

impl RiskLevel {
    /// Classify a probability into a tier. Total over its domain: a missing
    /// probability maps to `Unavailable` rather than an error.
    pub fn classify(probability: Option<f64>) -> Self {
        match probability {
            Some(p) if p < 0.33 => Self::Low,
            Some(p) if p < 0.66 => Self::Medium,
            Some(_) => Self::High,
            None => Self::Unavailable,
        }
    }

    /// Label shown inside the badge
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Medium => "Médio",
            Self::High => "Alto",
            Self::Unavailable => "Indisponível",
        }
    }

    /// Badge background color
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#2a7",
            Self::Medium => "#e6b800",
            Self::High => "#d33",
            Self::Unavailable => "#bbb",
        }
    }
}

/// Colored risk badge. Pure function of its props.
#[component]
pub fn RiskBadge(probability: Option<f64>) -> impl IntoView {
    let level = RiskLevel::classify(probability);

    view! {
        <span
            class="px-2 py-1 rounded-md text-white text-sm font-medium"
            style=format!("background-color: {}", level.color())
        >
            {level.label()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tiers() {
        assert_eq!(RiskLevel::classify(Some(0.10)), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(Some(0.50)), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(Some(0.90)), RiskLevel::High);
        assert_eq!(RiskLevel::classify(None), RiskLevel::Unavailable);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(RiskLevel::classify(Some(0.0)), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(Some(0.33)), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(Some(0.66)), RiskLevel::High);
        assert_eq!(RiskLevel::classify(Some(1.0)), RiskLevel::High);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(RiskLevel::Low.label(), "Baixo");
        assert_eq!(RiskLevel::Low.color(), "#2a7");
        assert_eq!(RiskLevel::Unavailable.label(), "Indisponível");
        assert_eq!(RiskLevel::Unavailable.color(), "#bbb");
    }
}
