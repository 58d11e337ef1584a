//! Quality → performance bucket mapping.

use super::model::{Label, PerformanceBucket, Quality};

/// Bucket used for any quality label outside the known set.
pub const FALLBACK_BUCKET: PerformanceBucket = PerformanceBucket::Poor;

/// Exhaustive over `Quality`: adding a variant will not compile until it is
/// mapped here.
pub fn performance_for(quality: Quality) -> PerformanceBucket {
    match quality {
        Quality::Excellence => PerformanceBucket::Excellent,
        Quality::VeryGood => PerformanceBucket::VeryGood,
        Quality::Good => PerformanceBucket::Good,
        Quality::Average => PerformanceBucket::Average,
        Quality::NeedsAttention => PerformanceBucket::Poor,
    }
}

/// Total over every input: unknown labels land in [`FALLBACK_BUCKET`].
pub fn classify_performance(quality: &Label<Quality>) -> PerformanceBucket {
    match quality {
        Label::Known(quality) => performance_for(*quality),
        Label::Unknown(_) => FALLBACK_BUCKET,
    }
}
