//! Light/dark palettes and the CSS that consumes them.
//!
//! Both palettes are fixed, fully populated tables. Chrome colors reach the
//! markup as CSS custom properties (see [`Palette::css_variables`]); chart
//! fills are looked up per category and passed into the geometry layer.

pub mod context;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::model::{Category, PerformanceBucket, RiskLevel, WorkletStatus};

pub use context::{provide_theme, use_theme_mode, ThemeToggle};

/// Shared stylesheet. Launchers inline it (`document::Style`).
pub const THEME_CSS: &str = include_str!("../../assets/theme/main.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Light, ThemeMode::Dark];

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ThemeMode::Light => "dashboard--light",
            ThemeMode::Dark => "dashboard--dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeMode,
    pub page_bg: &'static str,
    pub page_gradient: &'static str,
    pub main_text: &'static str,
    pub card_bg: &'static str,
    pub card_border: &'static str,
    pub card_shadow: &'static str,
    pub header_bg: &'static str,
    pub header_border: &'static str,
    pub header_shadow: &'static str,
    pub title_text: &'static str,
    pub label_text: &'static str,
    pub dropdown_bg: &'static str,
    pub dropdown_border: &'static str,
    pub dropdown_text: &'static str,
    pub dropdown_menu_bg: &'static str,
    pub dropdown_item_hover: &'static str,
    pub brand_mark: &'static str,
    pub brand_name: &'static str,
    pub brand_bracket: &'static str,
    pub bar_chart_grid: &'static str,
    pub kpi_bubble_bg: &'static str,
    pub kpi_bubble_border: &'static str,
    pub kpi_bubble_icon: &'static str,
    pub kpi_bubble_title: &'static str,
    pub kpi_bubble_subtext: &'static str,
    pub donut_center_bg: &'static str,
    /// Indexed by `WorkletStatus` declared order.
    pub status_colors: [&'static str; 5],
    /// Indexed by `PerformanceBucket` declared order.
    pub performance_colors: [&'static str; 5],
    /// Indexed by `RiskLevel` declared order.
    pub risk_colors: [&'static str; 3],
}

pub const LIGHT: Palette = Palette {
    mode: ThemeMode::Light,
    page_bg: "#eef2f6",
    page_gradient: "linear-gradient(to top, #d8b4fe, #eef2ff, #dbeafe)",
    main_text: "#334155",
    card_bg: "#ffffff",
    card_border: "#e2e8f0",
    card_shadow: "0 4px 6px -1px rgba(0,0,0,0.07), 0 2px 4px -2px rgba(0,0,0,0.07)",
    header_bg: "#ffffff",
    header_border: "#e2e8f0",
    header_shadow: "0 2px 4px rgba(0,0,0,0.04)",
    title_text: "#1e293b",
    label_text: "#64748b",
    dropdown_bg: "#f1f5f9",
    dropdown_border: "#cbd5e1",
    dropdown_text: "#475569",
    dropdown_menu_bg: "#ffffff",
    dropdown_item_hover: "#f8fafc",
    brand_mark: "#0a1d41",
    brand_name: "#005a9e",
    brand_bracket: "#60a5fa",
    bar_chart_grid: "#f1f5f9",
    kpi_bubble_bg: "#e0f2fe",
    kpi_bubble_border: "#90cdf4",
    kpi_bubble_icon: "#1d4ed8",
    kpi_bubble_title: "#1e3a8a",
    kpi_bubble_subtext: "#3b82f6",
    donut_center_bg: "#ffffff",
    status_colors: ["#2D3748", "#4299E1", "#ECC94B", "#F6AD55", "#E2E8F0"],
    performance_colors: ["#2D3748", "#4299E1", "#A0AEC0", "#F6AD55", "#E2E8F0"],
    risk_colors: ["#2D3748", "#4299E1", "#E2E8F0"],
};

pub const DARK: Palette = Palette {
    mode: ThemeMode::Dark,
    page_bg: "#1e293b",
    page_gradient: "linear-gradient(to top, #0f172a, #1e293b, #334155)",
    main_text: "#cbd5e1",
    card_bg: "#334155",
    card_border: "#475569",
    card_shadow: "0 4px 10px -1px rgba(0,0,0,0.2)",
    header_bg: "#283447",
    header_border: "#475569",
    header_shadow: "0 2px 4px rgba(0,0,0,0.2)",
    title_text: "#f1f5f9",
    label_text: "#94a3b8",
    dropdown_bg: "#475569",
    dropdown_border: "#64748b",
    dropdown_text: "#e2e8f0",
    dropdown_menu_bg: "#334155",
    dropdown_item_hover: "#475569",
    brand_mark: "#ffffff",
    brand_name: "#90cdf4",
    brand_bracket: "#60a5fa",
    bar_chart_grid: "#475569",
    kpi_bubble_bg: "#273453",
    kpi_bubble_border: "#3c528a",
    kpi_bubble_icon: "#90cdf4",
    kpi_bubble_title: "#dbeafe",
    kpi_bubble_subtext: "#93c5fd",
    donut_center_bg: "#334155",
    status_colors: ["#9AE6B4", "#63B3ED", "#F6E05E", "#F6AD55", "#A0AEC0"],
    performance_colors: ["#9AE6B4", "#63B3ED", "#A0AEC0", "#F6AD55", "#718096"],
    risk_colors: ["#FC8181", "#F6E05E", "#63B3ED"],
};

pub fn resolve_palette(mode: ThemeMode) -> &'static Palette {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}

impl Palette {
    pub fn status_color(&self, status: WorkletStatus) -> &'static str {
        self.status_colors[status.position()]
    }

    pub fn performance_color(&self, bucket: PerformanceBucket) -> &'static str {
        self.performance_colors[bucket.position()]
    }

    pub fn risk_color(&self, level: RiskLevel) -> &'static str {
        self.risk_colors[level.position()]
    }

    /// Chrome tokens as `(css-name, value)` pairs, in a fixed order.
    pub fn tokens(&self) -> [(&'static str, &'static str); 26] {
        [
            ("page-bg", self.page_bg),
            ("page-gradient", self.page_gradient),
            ("main-text", self.main_text),
            ("card-bg", self.card_bg),
            ("card-border", self.card_border),
            ("card-shadow", self.card_shadow),
            ("header-bg", self.header_bg),
            ("header-border", self.header_border),
            ("header-shadow", self.header_shadow),
            ("title-text", self.title_text),
            ("label-text", self.label_text),
            ("dropdown-bg", self.dropdown_bg),
            ("dropdown-border", self.dropdown_border),
            ("dropdown-text", self.dropdown_text),
            ("dropdown-menu-bg", self.dropdown_menu_bg),
            ("dropdown-item-hover", self.dropdown_item_hover),
            ("brand-mark", self.brand_mark),
            ("brand-name", self.brand_name),
            ("brand-bracket", self.brand_bracket),
            ("bar-chart-grid", self.bar_chart_grid),
            ("kpi-bubble-bg", self.kpi_bubble_bg),
            ("kpi-bubble-border", self.kpi_bubble_border),
            ("kpi-bubble-icon", self.kpi_bubble_icon),
            ("kpi-bubble-title", self.kpi_bubble_title),
            ("kpi-bubble-subtext", self.kpi_bubble_subtext),
            ("donut-center-bg", self.donut_center_bg),
        ]
    }

    /// Inline `style` value declaring every chrome token as `--<name>`.
    pub fn css_variables(&self) -> String {
        self.tokens()
            .iter()
            .map(|(name, value)| format!("--{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(value: &str) -> bool {
        value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn both_modes_define_the_same_tokens() {
        let light: Vec<_> = LIGHT.tokens().iter().map(|(name, _)| *name).collect();
        let dark: Vec<_> = DARK.tokens().iter().map(|(name, _)| *name).collect();
        assert_eq!(light, dark);

        for palette in [&LIGHT, &DARK] {
            for (name, value) in palette.tokens() {
                assert!(!value.trim().is_empty(), "{} `{name}` is blank", palette.mode);
            }
        }
    }

    #[test]
    fn category_tables_cover_every_category() {
        for palette in [&LIGHT, &DARK] {
            assert_eq!(palette.status_colors.len(), WorkletStatus::ALL.len());
            assert_eq!(palette.performance_colors.len(), PerformanceBucket::ALL.len());
            assert_eq!(palette.risk_colors.len(), RiskLevel::ALL.len());

            let fills = palette
                .status_colors
                .iter()
                .chain(palette.performance_colors.iter())
                .chain(palette.risk_colors.iter());
            for fill in fills {
                assert!(is_hex_color(fill), "{} fill {fill}", palette.mode);
            }
        }
    }

    #[test]
    fn resolver_and_toggle_agree() {
        for mode in ThemeMode::ALL {
            assert_eq!(resolve_palette(mode).mode, mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
        assert_eq!(DARK.risk_color(RiskLevel::High), "#FC8181");
        assert_eq!(LIGHT.status_color(WorkletStatus::OnHold), "#ECC94B");
        assert_eq!(DARK.performance_color(PerformanceBucket::Poor), "#718096");
    }

    #[test]
    fn css_variables_expose_every_token() {
        let css = DARK.css_variables();
        for (name, value) in DARK.tokens() {
            assert!(css.contains(&format!("--{name}: {value};")));
        }
    }

    #[test]
    fn stylesheet_reads_the_palette_variables() {
        for name in ["page-bg", "card-bg", "title-text", "kpi-bubble-bg", "donut-center-bg"] {
            assert!(THEME_CSS.contains(&format!("var(--{name})")), "{name}");
        }
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
    }
}
