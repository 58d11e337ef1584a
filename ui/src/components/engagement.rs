use dioxus::prelude::*;

use super::AnimatedNumber;

#[derive(Debug, Clone, PartialEq)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: u64,
}

/// Grid of KPI bubbles, fading in one after another.
#[component]
pub fn EngagementGrid(tiles: Vec<KpiTile>) -> Element {
    rsx! {
        div { class: "engagement-grid",
            for (index, tile) in tiles.iter().enumerate() {
                div {
                    key: "{tile.label}",
                    class: "kpi-bubble",
                    style: tile_style(index),
                    h4 { class: "kpi-bubble__value",
                        AnimatedNumber { key: "{tile.value}", value: tile.value }
                    }
                    p { class: "kpi-bubble__label", "{tile.label}" }
                }
            }
        }
    }
}

fn tile_style(index: usize) -> String {
    format!("animation-delay: {:.2}s;", index as f64 * 0.05 + 0.3)
}
