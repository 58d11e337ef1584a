//! End-to-end checks over the bundled sample dataset: fold, geometry and the
//! card exports built from them.

use ui::core::config::CONFIG;
use ui::core::dataset::sample_worklets;
use ui::core::format::format_degrees;
use ui::core::geometry::{bar_chart, donut_segments};
use ui::core::model::{EngagementMetric, PerformanceBucket, RiskLevel, WorkletStatus};
use ui::core::reveal::{Reveal, RevealState};
use ui::core::DashboardSnapshot;
use ui::export::{ChartExport, ChartKind};
use ui::theme::{ThemeMode, LIGHT};

fn snapshot() -> DashboardSnapshot {
    DashboardSnapshot::compute(sample_worklets(), &CONFIG)
}

#[test]
fn sample_status_counts_reconcile_with_the_collection() {
    let snapshot = snapshot();
    let status = &snapshot.stats.status_counts;

    assert_eq!(status.get(WorkletStatus::Completed), 6);
    assert_eq!(status.get(WorkletStatus::Ongoing), 8);
    assert_eq!(status.get(WorkletStatus::OnHold), 2);
    assert_eq!(status.get(WorkletStatus::Dropped), 2);
    assert_eq!(status.get(WorkletStatus::Terminated), 1);
    assert_eq!(status.total(), snapshot.stats.total_worklets);
    assert!(snapshot.stats.anomalies.is_empty());
}

#[test]
fn performance_covers_exactly_the_ongoing_worklets() {
    let snapshot = snapshot();
    let performance = &snapshot.stats.performance_counts;

    assert_eq!(
        performance.total(),
        snapshot.stats.status_counts.get(WorkletStatus::Ongoing)
    );
    assert_eq!(performance.get(PerformanceBucket::Excellent), 2);
    assert_eq!(performance.get(PerformanceBucket::Poor), 1);
}

#[test]
fn engagement_mixes_derived_and_configured_values() {
    let engagement = snapshot().engagement;

    assert_eq!(engagement.get(EngagementMetric::Students), 53);
    assert_eq!(engagement.get(EngagementMetric::Worklets), 19);
    assert_eq!(engagement.get(EngagementMetric::Professors), 150);
    assert_eq!(engagement.get(EngagementMetric::Patents), 2);
}

#[test]
fn risk_donut_angles_match_the_reference_layout() {
    let snapshot = snapshot();
    assert_eq!(snapshot.risk_total(), 19);

    let segments = donut_segments(&snapshot.risk);
    let labels: Vec<_> = segments.iter().map(|segment| segment.category).collect();
    assert_eq!(labels, [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]);

    assert_eq!(segments[0].start_deg, 0.0);
    assert_eq!(format_degrees(segments[0].end_deg), "56.84°");
    assert_eq!(format_degrees(segments[1].span_deg()), "94.74°");
    assert_eq!(segments[2].end_deg, 360.0);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end_deg, pair[1].start_deg);
    }
}

#[test]
fn tallest_status_bar_is_full_height() {
    let bars = bar_chart(&snapshot().stats.status_counts, |status| {
        LIGHT.status_color(status)
    });
    let ongoing = bars
        .iter()
        .find(|bar| bar.label == "Ongoing")
        .map(|bar| bar.fraction);
    assert_eq!(ongoing, Some(1.0));
    assert!(bars.iter().all(|bar| (0.0..=1.0).contains(&bar.fraction)));
}

#[test]
fn recomputing_is_idempotent() {
    assert_eq!(snapshot(), snapshot());
}

#[test]
fn status_export_lists_every_status_in_order() {
    let snapshot = snapshot();
    let export = ChartExport::from_counts(
        "status",
        "Overall Worklet Status",
        ChartKind::Bars,
        ThemeMode::Light,
        &snapshot.stats.status_counts,
        |status| LIGHT.status_color(status),
    );
    let csv = export.to_csv();
    let labels: Vec<_> = csv
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .collect();
    assert_eq!(
        labels,
        ["Completed", "Ongoing", "On Hold", "Dropped", "Terminated"]
    );
}

#[test]
fn reveal_counts_up_once_and_lands_exactly() {
    let mut reveal = Reveal::with_timing(1000, 1500.0, 0.5);

    assert!(!reveal.observe(0.3, 0.0));
    assert!(reveal.observe(0.6, 100.0));
    assert!(!reveal.observe(0.9, 200.0));

    let mut last = 0;
    for step in 0..=40 {
        let value = reveal.tick(100.0 + f64::from(step) * 40.0);
        assert!(value >= last);
        last = value;
    }
    assert_eq!(reveal.displayed(), 1000);
    assert_eq!(reveal.state(), RevealState::Settled);
    assert!(!reveal.needs_frame());
}
