use dioxus::prelude::*;

use super::AnimatedNumber;
use crate::core::format::{format_count, format_degrees, format_percent, share};
use crate::core::geometry::{conic_gradient, DonutSlice};
use crate::t;

/// Ring painted with a `conic-gradient`, an animated total in the hole and a
/// legend in the same order as the segments.
#[component]
pub fn DonutChart(slices: Vec<DonutSlice>, total: u64, empty_color: &'static str) -> Element {
    let background = format!("background: {};", conic_gradient(&slices, empty_color));

    rsx! {
        div { class: "donut",
            div { class: "donut__wrapper",
                div { class: "donut__ring", style: "{background}" }
                div { class: "donut__center",
                    span { class: "donut__total-label", {t!("donut-total")} }
                    span { class: "donut__total-value",
                        AnimatedNumber { key: "{total}", value: total }
                    }
                }
            }
            ul { class: "donut__legend",
                for slice in slices.iter() {
                    li {
                        key: "{slice.label}",
                        class: "legend-item",
                        title: "{legend_tooltip(slice, total)}",
                        span {
                            class: "legend-item__dot",
                            style: "background-color: {slice.color};",
                        }
                        span { class: "legend-item__label", "{slice.label}" }
                        span { class: "legend-item__count",
                            AnimatedNumber { key: "{slice.count}", value: slice.count }
                        }
                    }
                }
            }
        }
    }
}

/// Hover text for a legend row: exact count, share of the ring and arc size.
fn legend_tooltip(slice: &DonutSlice, total: u64) -> String {
    format!(
        "{}: {} ({}, {})",
        slice.label,
        format_count(slice.count),
        format_percent(share(slice.count, total)),
        format_degrees(slice.end_deg - slice.start_deg)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_names_count_share_and_arc() {
        let slice = DonutSlice {
            label: "Medium",
            count: 5,
            start_deg: 56.842,
            end_deg: 151.579,
            color: "#ED8936",
        };
        assert_eq!(legend_tooltip(&slice, 19), "Medium: 5 (26%, 94.74°)");
    }

    #[test]
    fn empty_ring_tooltip_has_zero_share() {
        let slice = DonutSlice {
            label: "Low",
            count: 0,
            start_deg: 0.0,
            end_deg: 0.0,
            color: "#48BB78",
        };
        assert_eq!(legend_tooltip(&slice, 0), "Low: 0 (0%, 0.00°)");
    }
}
