use std::rc::Rc;

use dioxus::prelude::*;
use tracing::info;

use crate::components::{
    BarChart, Card, DashboardHeader, DonutChart, EngagementGrid, KpiTile,
};
use crate::core::aggregate::DashboardSnapshot;
use crate::core::config::{SelectorState, CONFIG};
use crate::core::dataset::sample_worklets;
use crate::core::geometry::{bar_chart, donut_slices, BarGeometry, DonutSlice};
use crate::core::model::Category;
use crate::core::platform::Platform;
use crate::export::{ChartExport, ChartKind};
use crate::t;
use crate::theme::{resolve_palette, use_theme_mode, Palette, ThemeMode};

/// Everything the four cards render, derived from one snapshot and one
/// palette. Rebuilt on every theme change; the snapshot itself is not.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCards {
    pub status_bars: Vec<BarGeometry>,
    pub performance_bars: Vec<BarGeometry>,
    pub tiles: Vec<KpiTile>,
    pub risk_slices: Vec<DonutSlice>,
    pub risk_total: u64,
    pub empty_ring: &'static str,
    pub status_export: ChartExport,
    pub engagement_export: ChartExport,
    pub performance_export: ChartExport,
    pub risk_export: ChartExport,
}

impl DashboardCards {
    pub fn compose(snapshot: &DashboardSnapshot, palette: &'static Palette) -> Self {
        let mode: ThemeMode = palette.mode;
        let stats = &snapshot.stats;

        Self {
            status_bars: bar_chart(&stats.status_counts, |status| palette.status_color(status)),
            performance_bars: bar_chart(&stats.performance_counts, |bucket| {
                palette.performance_color(bucket)
            }),
            tiles: snapshot
                .engagement
                .iter()
                .map(|(metric, value)| KpiTile {
                    label: metric.label(),
                    value,
                })
                .collect(),
            risk_slices: donut_slices(&snapshot.risk, |level| palette.risk_color(level)),
            risk_total: snapshot.risk_total(),
            empty_ring: palette.bar_chart_grid,
            status_export: ChartExport::from_counts(
                "status",
                t!("card-status-title"),
                ChartKind::Bars,
                mode,
                &stats.status_counts,
                |status| palette.status_color(status),
            ),
            engagement_export: ChartExport::from_counts(
                "engagement",
                t!("card-engagement-title"),
                ChartKind::Tiles,
                mode,
                &snapshot.engagement,
                |_| palette.kpi_bubble_title,
            ),
            performance_export: ChartExport::from_counts(
                "performance",
                t!("card-performance-title"),
                ChartKind::Bars,
                mode,
                &stats.performance_counts,
                |bucket| palette.performance_color(bucket),
            ),
            risk_export: ChartExport::from_counts(
                "risk",
                t!("card-risk-title"),
                ChartKind::Donut,
                mode,
                &snapshot.risk,
                |level| palette.risk_color(level),
            ),
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    // Computed once per mount; the dataset is static.
    let snapshot = use_hook(|| {
        let snapshot = DashboardSnapshot::compute(sample_worklets(), &CONFIG);
        info!(
            platform = Platform::current().as_str(),
            worklets = snapshot.stats.total_worklets,
            anomalies = snapshot.stats.anomalies.len(),
            "dashboard mounted"
        );
        Rc::new(snapshot)
    });
    let selection = use_signal(|| SelectorState::initial(&CONFIG.selectors));
    let mode = use_theme_mode();
    let palette = resolve_palette(mode());
    let cards = DashboardCards::compose(&snapshot, palette);
    let root_class = format!("dashboard {}", palette.mode.css_class());
    let root_style = palette.css_variables();
    let app_title = t!("app-title");

    rsx! {
        document::Title { "{app_title}" }
        div {
            class: "{root_class}",
            style: "{root_style}",
            DashboardHeader { selection }

            main { class: "dashboard__grid",
                Card {
                    title: t!("card-status-title"),
                    delay_s: 0.1,
                    export: cards.status_export,
                    BarChart { bars: cards.status_bars }
                }
                Card {
                    title: t!("card-engagement-title"),
                    delay_s: 0.2,
                    export: cards.engagement_export,
                    EngagementGrid { tiles: cards.tiles }
                }
                Card {
                    title: t!("card-performance-title"),
                    delay_s: 0.3,
                    export: cards.performance_export,
                    BarChart { bars: cards.performance_bars }
                }
                Card {
                    title: t!("card-risk-title"),
                    delay_s: 0.4,
                    export: cards.risk_export,
                    DonutChart {
                        slices: cards.risk_slices,
                        total: cards.risk_total,
                        empty_color: cards.empty_ring,
                    }
                }
            }
        }
    }
}
