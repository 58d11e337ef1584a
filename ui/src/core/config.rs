//! Dashboard configuration: the externally supplied constants and selector
//! option lists, embedded as JSON and validated on load.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::reveal::{DEFAULT_DURATION_MS, DEFAULT_THRESHOLD};

const EMBEDDED_CONFIG: &str = include_str!("../../assets/data/dashboard.json");

/// Process-wide configuration, parsed once from the embedded JSON.
pub static CONFIG: Lazy<DashboardConfig> = Lazy::new(DashboardConfig::load_embedded);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dashboard config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("selector list `{0}` has no options")]
    EmptySelector(&'static str),
    #[error("animation setting `{field}` is out of range ({value})")]
    Animation { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub engagement: EngagementConstants,
    pub risk: RiskInputs,
    pub selectors: SelectorOptions,
    pub animation: AnimationSettings,
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, options) in self.selectors.lists() {
            if options.is_empty() {
                return Err(ConfigError::EmptySelector(name));
            }
        }

        let animation = &self.animation;
        if !(animation.reveal_duration_ms.is_finite() && animation.reveal_duration_ms > 0.0) {
            return Err(ConfigError::Animation {
                field: "reveal_duration_ms",
                value: animation.reveal_duration_ms,
            });
        }
        if !(animation.visibility_threshold > 0.0 && animation.visibility_threshold <= 1.0) {
            return Err(ConfigError::Animation {
                field: "visibility_threshold",
                value: animation.visibility_threshold,
            });
        }
        Ok(())
    }

    /// Parse the embedded JSON; a broken file degrades to the defaults rather
    /// than taking the dashboard down.
    pub fn load_embedded() -> Self {
        match Self::from_json(EMBEDDED_CONFIG) {
            Ok(config) => {
                debug!(?config.risk, ?config.engagement, "dashboard config loaded");
                config
            }
            Err(err) => {
                warn!(%err, "falling back to built-in dashboard config");
                Self::default()
            }
        }
    }
}

/// Engagement tiles that are not derived from the worklet collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConstants {
    pub professors: u64,
    pub mentors: u64,
    pub papers: u64,
    pub patents: u64,
}

impl Default for EngagementConstants {
    fn default() -> Self {
        Self {
            professors: 150,
            mentors: 90,
            papers: 6,
            patents: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskInputs {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl Default for RiskInputs {
    fn default() -> Self {
        Self {
            high: 3,
            medium: 5,
            low: 11,
        }
    }
}

/// Option lists for the header dropdowns. The first entry is the initial
/// selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    pub teams: Vec<String>,
    pub groups: Vec<String>,
    pub parts: Vec<String>,
    pub years: Vec<String>,
}

impl SelectorOptions {
    fn lists(&self) -> [(&'static str, &Vec<String>); 4] {
        [
            ("teams", &self.teams),
            ("groups", &self.groups),
            ("parts", &self.parts),
            ("years", &self.years),
        ]
    }
}

impl Default for SelectorOptions {
    fn default() -> Self {
        fn owned(values: &[&str]) -> Vec<String> {
            values.iter().map(|value| value.to_string()).collect()
        }

        Self {
            teams: owned(&["TECH STRATEGY TEAM", "CORE TECH TEAM", "INNOVATION TEAM"]),
            groups: owned(&["R&D Strategy Group", "Product Planning", "Advanced Research"]),
            parts: owned(&["All Parts", "Part A", "Part B", "Part C"]),
            years: owned(&["All Years", "2025", "2024", "2023", "2022"]),
        }
    }
}

/// Current dropdown selections. Purely presentational: aggregation always
/// covers the full worklet collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorState {
    pub team: String,
    pub group: String,
    pub part: String,
    pub year: String,
}

impl SelectorState {
    pub fn initial(options: &SelectorOptions) -> Self {
        fn first(values: &[String]) -> String {
            values.first().cloned().unwrap_or_default()
        }

        Self {
            team: first(&options.teams),
            group: first(&options.groups),
            part: first(&options.parts),
            year: first(&options.years),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub reveal_duration_ms: f64,
    /// Fraction of the element that must be on screen before the reveal starts.
    pub visibility_threshold: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            reveal_duration_ms: DEFAULT_DURATION_MS,
            visibility_threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        let parsed = DashboardConfig::from_json(EMBEDDED_CONFIG).expect("embedded config parses");
        assert_eq!(parsed, DashboardConfig::default());
    }

    #[test]
    fn default_config_is_the_sum_of_section_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.engagement, EngagementConstants::default());
        assert_eq!(config.risk, RiskInputs::default());
        assert_eq!(config.selectors, SelectorOptions::default());
        assert_eq!(config.animation.reveal_duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(config.animation.visibility_threshold, DEFAULT_THRESHOLD);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = DashboardConfig::from_json(r#"{ "risk": { "high": 7 } }"#).unwrap();
        assert_eq!(config.risk.high, 7);
        assert_eq!(config.risk.low, 11);
        assert_eq!(config.engagement.professors, 150);
    }

    #[test]
    fn empty_selector_lists_are_rejected() {
        let err = DashboardConfig::from_json(r#"{ "selectors": { "years": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySelector("years")));
    }

    #[test]
    fn nonsensical_animation_settings_are_rejected() {
        let err = DashboardConfig::from_json(r#"{ "animation": { "visibility_threshold": 1.5 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Animation {
                field: "visibility_threshold",
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            DashboardConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn initial_selection_takes_first_option() {
        let state = SelectorState::initial(&SelectorOptions::default());
        assert_eq!(state.team, "TECH STRATEGY TEAM");
        assert_eq!(state.year, "All Years");
    }
}
