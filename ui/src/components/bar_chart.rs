use dioxus::prelude::*;

use crate::core::geometry::BarGeometry;

/// Vertical bars scaled to the tallest bar in the group. Each bar grows in
/// after its own staggered delay; the value above it is shown as-is from the
/// first paint.
#[component]
pub fn BarChart(bars: Vec<BarGeometry>) -> Element {
    rsx! {
        div { class: "bar-chart",
            for bar in bars.iter() {
                div { key: "{bar.label}", class: "bar",
                    div { class: "bar__value", {value_label(bar)} }
                    div {
                        class: "bar__fill",
                        style: bar_style(bar),
                    }
                    div { class: "bar__label", "{bar.label}" }
                }
            }
        }
    }
}

fn value_label(bar: &BarGeometry) -> String {
    bar.value.to_string()
}

fn bar_style(bar: &BarGeometry) -> String {
    format!(
        "height: {:.2}%; background-color: {}; animation-delay: {:.1}s;",
        bar.percent(),
        bar.color,
        bar.delay_s
    )
}
