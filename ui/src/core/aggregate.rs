//! Folding the worklet collection into the dashboard's derived metrics.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::classify::classify_performance;
use super::config::{DashboardConfig, EngagementConstants, RiskInputs};
use super::counts::CategoryCounts;
use super::model::{
    EngagementMetric, Label, PerformanceBucket, RiskLevel, Worklet, WorkletStatus,
};

/// A record that could not be placed in its intended bucket. Kept as data on
/// the stats rather than failing the fold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryAnomaly {
    #[error("worklet {worklet} has unrecognized status {label:?}; excluded from status counts")]
    UnknownStatus { worklet: String, label: String },
    #[error("ongoing worklet {worklet} has unrecognized quality {label:?}; counted as Poor")]
    UnknownQuality { worklet: String, label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkletStats {
    pub status_counts: CategoryCounts<WorkletStatus>,
    /// Ongoing worklets only.
    pub performance_counts: CategoryCounts<PerformanceBucket>,
    pub total_students: u64,
    pub total_worklets: u64,
    pub anomalies: Vec<CategoryAnomaly>,
}

/// Pure fold over the collection. Calling it twice on the same input yields
/// equal results.
pub fn aggregate(worklets: &[Worklet]) -> WorkletStats {
    let mut status_counts = CategoryCounts::<WorkletStatus>::seeded();
    let mut performance_counts = CategoryCounts::<PerformanceBucket>::seeded();
    let mut total_students = 0u64;
    let mut anomalies = Vec::new();

    for worklet in worklets {
        total_students = total_students.saturating_add(worklet.students.len() as u64);

        match &worklet.status {
            Label::Known(status) => status_counts.increment(*status),
            Label::Unknown(raw) => anomalies.push(CategoryAnomaly::UnknownStatus {
                worklet: worklet.id.clone(),
                label: raw.clone(),
            }),
        }

        if !worklet.is_ongoing() {
            continue;
        }

        if let Label::Unknown(raw) = &worklet.quality {
            anomalies.push(CategoryAnomaly::UnknownQuality {
                worklet: worklet.id.clone(),
                label: raw.clone(),
            });
        }
        performance_counts.increment(classify_performance(&worklet.quality));
    }

    WorkletStats {
        status_counts,
        performance_counts,
        total_students,
        total_worklets: worklets.len() as u64,
        anomalies,
    }
}

/// KPI tiles: Students and Worklets come from the fold, the rest are
/// configuration constants passed through untouched.
pub fn engagement(
    stats: &WorkletStats,
    constants: &EngagementConstants,
) -> CategoryCounts<EngagementMetric> {
    CategoryCounts::from_fn(|metric| match metric {
        EngagementMetric::Students => stats.total_students,
        EngagementMetric::Professors => constants.professors,
        EngagementMetric::Mentors => constants.mentors,
        EngagementMetric::Worklets => stats.total_worklets,
        EngagementMetric::Papers => constants.papers,
        EngagementMetric::Patents => constants.patents,
    })
}

pub fn risk_distribution(inputs: &RiskInputs) -> CategoryCounts<RiskLevel> {
    CategoryCounts::from_fn(|level| match level {
        RiskLevel::High => inputs.high,
        RiskLevel::Medium => inputs.medium,
        RiskLevel::Low => inputs.low,
    })
}

/// Everything the view composer reads, computed in one pass and memoized by
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: WorkletStats,
    pub engagement: CategoryCounts<EngagementMetric>,
    pub risk: CategoryCounts<RiskLevel>,
}

impl DashboardSnapshot {
    pub fn compute(worklets: &[Worklet], config: &DashboardConfig) -> Self {
        let stats = aggregate(worklets);
        for anomaly in &stats.anomalies {
            warn!(%anomaly, "isolated worklet anomaly");
        }

        let engagement = engagement(&stats, &config.engagement);
        let risk = risk_distribution(&config.risk);

        debug!(
            worklets = stats.total_worklets,
            students = stats.total_students,
            ongoing = stats.status_counts.get(WorkletStatus::Ongoing),
            risk_total = risk.total(),
            "dashboard snapshot computed"
        );

        Self {
            stats,
            engagement,
            risk,
        }
    }

    pub fn risk_total(&self) -> u64 {
        self.risk.total()
    }
}
