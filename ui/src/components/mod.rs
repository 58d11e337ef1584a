//! Dashboard building blocks. Each takes already-computed geometry or counts;
//! none of them aggregate.

mod animated_number;
mod bar_chart;
mod card;
mod dashboard_header;
mod donut_chart;
mod dropdown;
mod engagement;

pub use animated_number::{release_script, watch_script, AnimatedNumber};
pub use bar_chart::BarChart;
pub use card::Card;
pub use dashboard_header::DashboardHeader;
pub use donut_chart::DonutChart;
pub use dropdown::Dropdown;
pub use engagement::{EngagementGrid, KpiTile};
