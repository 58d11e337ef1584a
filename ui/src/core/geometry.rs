//! Chart geometry: proportional bar heights and contiguous donut arcs.
//!
//! Everything here is a pure function of counts plus an injected color
//! lookup; nothing reads ambient theme state.

use std::f64::consts::PI;
use std::fmt::Write as _;

use serde::Serialize;

use super::counts::CategoryCounts;
use super::model::Category;

pub const FULL_TURN_DEG: f64 = 360.0;

/// Stagger between neighbouring bars' grow-in animation.
const BAR_DELAY_STEP_S: f64 = 0.1;
const BAR_DELAY_BASE_S: f64 = 0.5;

/// Height of a bar as a fraction of the tallest bar in its group.
///
/// The divisor is floored at 1 so an all-zero group yields 0 everywhere
/// instead of dividing by zero.
pub fn bar_height(value: u64, max_value: u64) -> f64 {
    let divisor = max_value.max(1) as f64;
    (value as f64 / divisor).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub label: &'static str,
    pub value: u64,
    /// In `[0, 1]`, relative to the group maximum.
    pub fraction: f64,
    pub color: &'static str,
    pub delay_s: f64,
}

impl BarGeometry {
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

pub fn bar_chart<C: Category>(
    counts: &CategoryCounts<C>,
    color_of: impl Fn(C) -> &'static str,
) -> Vec<BarGeometry> {
    let max_value = counts.max();
    counts
        .iter()
        .enumerate()
        .map(|(index, (category, value))| BarGeometry {
            label: category.label(),
            value,
            fraction: bar_height(value, max_value),
            color: color_of(category),
            delay_s: bar_delay(index),
        })
        .collect()
}

fn bar_delay(index: usize) -> f64 {
    index as f64 * BAR_DELAY_STEP_S + BAR_DELAY_BASE_S
}

/// `(start, end)` angles in degrees for each value, in input order.
///
/// Angles come from running integer totals so each segment's end is exactly
/// the next one's start and the last end is exactly 360° when the total is
/// positive. A zero total collapses every segment to `(0, 0)`.
pub fn arc_spans(values: &[u64]) -> Vec<(f64, f64)> {
    let total = values
        .iter()
        .fold(0u64, |acc, value| acc.saturating_add(*value));
    let angle_at = |cumulative: u64| {
        if total == 0 {
            0.0
        } else {
            cumulative as f64 / total as f64 * FULL_TURN_DEG
        }
    };

    let mut cumulative = 0u64;
    values
        .iter()
        .map(|value| {
            let start = angle_at(cumulative);
            cumulative = cumulative.saturating_add(*value);
            (start, angle_at(cumulative))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSegment<C> {
    pub category: C,
    pub count: u64,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl<C: Category> DonutSegment<C> {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn span_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }
}

/// Segments in the category's declared order (which is also legend order).
pub fn donut_segments<C: Category>(counts: &CategoryCounts<C>) -> Vec<DonutSegment<C>> {
    counts
        .iter()
        .zip(arc_spans(&counts.values()))
        .map(|((category, count), (start_deg, end_deg))| DonutSegment {
            category,
            count,
            start_deg,
            end_deg,
        })
        .collect()
}

/// A segment with its fill resolved, ready for the composer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSlice {
    pub label: &'static str,
    pub count: u64,
    pub start_deg: f64,
    pub end_deg: f64,
    pub color: &'static str,
}

pub fn donut_slices<C: Category>(
    counts: &CategoryCounts<C>,
    color_of: impl Fn(C) -> &'static str,
) -> Vec<DonutSlice> {
    donut_segments(counts)
        .into_iter()
        .map(|segment| DonutSlice {
            label: segment.label(),
            count: segment.count,
            start_deg: segment.start_deg,
            end_deg: segment.end_deg,
            color: color_of(segment.category),
        })
        .collect()
}

/// CSS `conic-gradient` painting the slices; an empty ring when nothing has
/// any span.
pub fn conic_gradient(slices: &[DonutSlice], empty_color: &str) -> String {
    let stops: Vec<String> = slices
        .iter()
        .filter(|slice| slice.end_deg > slice.start_deg)
        .map(|slice| {
            format!(
                "{} {}deg {}deg",
                slice.color,
                trim_angle(slice.start_deg),
                trim_angle(slice.end_deg)
            )
        })
        .collect();

    if stops.is_empty() {
        format!("conic-gradient({empty_color} 0deg 360deg)")
    } else {
        format!("conic-gradient({})", stops.join(", "))
    }
}

fn trim_angle(value: f64) -> String {
    let rounded = format!("{value:.2}");
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// SVG path for an annulus sector, angles clockwise from twelve o'clock (the
/// same origin `conic-gradient` uses). Returns an empty string for a zero span.
pub fn arc_path(start_deg: f64, end_deg: f64, cx: f64, cy: f64, outer: f64, inner: f64) -> String {
    let span = end_deg - start_deg;
    if span <= 0.0 {
        return String::new();
    }
    // A single arc cannot describe a full circle; split it in two.
    if span >= FULL_TURN_DEG - 1e-9 {
        let middle = start_deg + FULL_TURN_DEG / 2.0;
        let mut path = arc_path(start_deg, middle, cx, cy, outer, inner);
        path.push(' ');
        path.push_str(&arc_path(middle, end_deg, cx, cy, outer, inner));
        return path;
    }

    let large_arc = u8::from(span > FULL_TURN_DEG / 2.0);
    let (ox0, oy0) = polar(cx, cy, outer, start_deg);
    let (ox1, oy1) = polar(cx, cy, outer, end_deg);
    let (ix1, iy1) = polar(cx, cy, inner, end_deg);
    let (ix0, iy0) = polar(cx, cy, inner, start_deg);

    let mut path = String::new();
    let _ = write!(
        path,
        "M {ox0:.3} {oy0:.3} A {outer:.3} {outer:.3} 0 {large_arc} 1 {ox1:.3} {oy1:.3} \
         L {ix1:.3} {iy1:.3} A {inner:.3} {inner:.3} 0 {large_arc} 0 {ix0:.3} {iy0:.3} Z"
    );
    path
}

fn polar(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg * PI / 180.0;
    (cx + radius * radians.sin(), cy - radius * radians.cos())
}
