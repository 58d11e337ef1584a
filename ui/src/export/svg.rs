//! Static SVG snapshot of a card, used for the SVG export and as the source
//! for PNG rasterization.

use std::fmt::Write as _;

use super::{ChartExport, ChartKind, ExportRow};
use crate::core::format::{format_count, format_percent};
use crate::core::geometry::{arc_path, arc_spans, bar_height};
use crate::t;
use crate::theme::{resolve_palette, Palette};

pub const WIDTH: f64 = 960.0;
pub const HEIGHT: f64 = 540.0;

const FONT: &str = "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif";

pub fn render(export: &ChartExport) -> String {
    let palette = resolve_palette(export.theme);
    let mut out = String::new();

    let _ = write!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{WIDTH}' height='{HEIGHT}' \
         viewBox='0 0 {WIDTH} {HEIGHT}' font-family=\"{FONT}\">"
    );
    let _ = write!(
        out,
        "<rect x='0.5' y='0.5' width='{}' height='{}' rx='16' fill='{}' stroke='{}'/>",
        WIDTH - 1.0,
        HEIGHT - 1.0,
        palette.card_bg,
        palette.card_border
    );
    let _ = write!(
        out,
        "<text x='40' y='64' font-size='28' font-weight='700' fill='{}'>{}</text>",
        palette.title_text,
        escape_xml(&export.title)
    );

    match export.kind {
        ChartKind::Bars => bars(&mut out, &export.rows, palette),
        ChartKind::Tiles => tiles(&mut out, &export.rows, palette),
        ChartKind::Donut => donut(&mut out, export, palette),
    }

    out.push_str("</svg>");
    out
}

fn bars(out: &mut String, rows: &[ExportRow], palette: &Palette) {
    const LEFT: f64 = 60.0;
    const RIGHT: f64 = WIDTH - 60.0;
    const BASELINE: f64 = 440.0;
    const MAX_BAR: f64 = 300.0;

    for step in 0..=4 {
        let y = BASELINE - MAX_BAR * f64::from(step) / 4.0;
        let _ = write!(
            out,
            "<line x1='{LEFT}' y1='{y}' x2='{RIGHT}' y2='{y}' stroke='{}' stroke-width='1'/>",
            palette.bar_chart_grid
        );
    }

    if rows.is_empty() {
        return;
    }
    let max_value = rows.iter().map(|row| row.value).max().unwrap_or(0);
    let slot = (RIGHT - LEFT) / rows.len() as f64;
    let width = slot * 0.6;

    for (index, row) in rows.iter().enumerate() {
        let height = bar_height(row.value, max_value) * MAX_BAR;
        let x = LEFT + slot * index as f64 + (slot - width) / 2.0;
        let center = x + width / 2.0;
        let top = BASELINE - height;
        let _ = write!(
            out,
            "<rect x='{x:.1}' y='{top:.1}' width='{width:.1}' height='{height:.1}' rx='4' fill='{}'/>",
            row.color
        );
        let _ = write!(
            out,
            "<text x='{center:.1}' y='{:.1}' font-size='16' font-weight='600' text-anchor='middle' fill='{}'>{}</text>",
            top - 10.0,
            palette.title_text,
            format_count(row.value)
        );
        let _ = write!(
            out,
            "<text x='{center:.1}' y='{:.1}' font-size='14' text-anchor='middle' fill='{}'>{}</text>",
            BASELINE + 28.0,
            palette.label_text,
            escape_xml(row.label)
        );
    }
}

fn tiles(out: &mut String, rows: &[ExportRow], palette: &Palette) {
    const COLUMNS: usize = 3;
    const TILE_W: f64 = 260.0;
    const TILE_H: f64 = 170.0;
    const GAP: f64 = 24.0;
    const TOP: f64 = 110.0;
    let left = (WIDTH - (TILE_W * COLUMNS as f64 + GAP * (COLUMNS as f64 - 1.0))) / 2.0;

    for (index, row) in rows.iter().enumerate() {
        let x = left + (index % COLUMNS) as f64 * (TILE_W + GAP);
        let y = TOP + (index / COLUMNS) as f64 * (TILE_H + GAP);
        let center = x + TILE_W / 2.0;
        let _ = write!(
            out,
            "<rect x='{x:.1}' y='{y:.1}' width='{TILE_W}' height='{TILE_H}' rx='12' fill='{}' stroke='{}'/>",
            palette.kpi_bubble_bg, palette.kpi_bubble_border
        );
        let _ = write!(
            out,
            "<text x='{center:.1}' y='{:.1}' font-size='40' font-weight='700' text-anchor='middle' fill='{}'>{}</text>",
            y + TILE_H / 2.0 + 6.0,
            palette.kpi_bubble_title,
            format_count(row.value)
        );
        let _ = write!(
            out,
            "<text x='{center:.1}' y='{:.1}' font-size='16' font-weight='500' text-anchor='middle' fill='{}'>{}</text>",
            y + TILE_H / 2.0 + 40.0,
            palette.kpi_bubble_subtext,
            escape_xml(row.label)
        );
    }
}

fn donut(out: &mut String, export: &ChartExport, palette: &Palette) {
    const CX: f64 = 300.0;
    const CY: f64 = 300.0;
    const OUTER: f64 = 170.0;
    const INNER: f64 = 105.0;

    let values: Vec<u64> = export.rows.iter().map(|row| row.value).collect();
    if export.total == 0 {
        let _ = write!(
            out,
            "<circle cx='{CX}' cy='{CY}' r='{:.1}' fill='none' stroke='{}' stroke-width='{:.1}'/>",
            (OUTER + INNER) / 2.0,
            palette.bar_chart_grid,
            OUTER - INNER
        );
    }
    for (row, (start, end)) in export.rows.iter().zip(arc_spans(&values)) {
        let path = arc_path(start, end, CX, CY, OUTER, INNER);
        if !path.is_empty() {
            let _ = write!(out, "<path d='{path}' fill='{}'/>", row.color);
        }
    }

    let _ = write!(
        out,
        "<circle cx='{CX}' cy='{CY}' r='{INNER}' fill='{}' stroke='{}'/>",
        palette.donut_center_bg, palette.card_border
    );
    let _ = write!(
        out,
        "<text x='{CX}' y='{:.1}' font-size='16' text-anchor='middle' fill='{}'>{}</text>",
        CY - 12.0,
        palette.label_text,
        escape_xml(&t!("donut-total"))
    );
    let _ = write!(
        out,
        "<text x='{CX}' y='{:.1}' font-size='40' font-weight='700' text-anchor='middle' fill='{}'>{}</text>",
        CY + 30.0,
        palette.title_text,
        format_count(export.total)
    );

    for (index, row) in export.rows.iter().enumerate() {
        let y = 230.0 + index as f64 * 44.0;
        let _ = write!(
            out,
            "<rect x='560' y='{:.1}' width='16' height='16' rx='4' fill='{}'/>",
            y - 13.0,
            row.color
        );
        let _ = write!(
            out,
            "<text x='588' y='{y:.1}' font-size='18' fill='{}'>{}</text>",
            palette.main_text,
            escape_xml(row.label)
        );
        let _ = write!(
            out,
            "<text x='880' y='{y:.1}' font-size='18' font-weight='600' text-anchor='end' fill='{}'>{} ({})</text>",
            palette.title_text,
            format_count(row.value),
            format_percent(row.share)
        );
    }
}

pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::counts::CategoryCounts;
    use crate::core::model::{RiskLevel, WorkletStatus};
    use crate::theme::{ThemeMode, DARK};

    #[test]
    fn bar_snapshot_draws_one_rect_per_category() {
        let counts = CategoryCounts::<WorkletStatus>::from_fn(|status| match status {
            WorkletStatus::Ongoing => 8,
            _ => 0,
        });
        let export = ChartExport::from_counts(
            "status",
            "Overall Worklet Status",
            ChartKind::Bars,
            ThemeMode::Dark,
            &counts,
            |status| DARK.status_color(status),
        );
        let svg = render(&export);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("rx='4'").count(), 5);
        assert!(svg.contains("On Hold"));
        assert!(svg.contains(DARK.card_bg));
    }

    #[test]
    fn donut_snapshot_skips_empty_slices() {
        crate::i18n::init();
        let counts = CategoryCounts::<RiskLevel>::from_fn(|level| match level {
            RiskLevel::High => 0,
            RiskLevel::Medium => 2,
            RiskLevel::Low => 2,
        });
        let export = ChartExport::from_counts(
            "risk",
            "Risk & <co>",
            ChartKind::Donut,
            ThemeMode::Light,
            &counts,
            |_| "#123456",
        );
        let svg = render(&export);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("Risk &amp; &lt;co&gt;"));
    }
}
