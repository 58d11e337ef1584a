//! Platform-independent dashboard logic: the data model, aggregation, chart
//! geometry and the reveal state machine.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod counts;
pub mod dataset;
pub mod format;
pub mod geometry;
pub mod model;
pub mod platform;
pub mod reveal;

pub use aggregate::{aggregate, CategoryAnomaly, DashboardSnapshot, WorkletStats};
pub use classify::classify_performance;
pub use config::{DashboardConfig, SelectorState, CONFIG};
pub use counts::CategoryCounts;
pub use model::{
    Category, EngagementMetric, Label, PerformanceBucket, Quality, RiskLevel, Worklet,
    WorkletStatus,
};
pub use reveal::{Reveal, RevealState};
