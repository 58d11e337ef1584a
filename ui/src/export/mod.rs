//! Per-card exports: JSON (also copied to the clipboard), CSV, SVG and PNG.
//!
//! A card hands over a [`ChartExport`]: its title plus one row per category in
//! declared order. Everything that touches the outside world (clipboard,
//! files, downloads) lives in [`deliver`].

pub mod deliver;
pub mod svg;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::counts::CategoryCounts;
use crate::core::format::share;
use crate::core::model::Category;
use crate::t;
use crate::theme::ThemeMode;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("could not write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no writable export directory on this platform")]
    NoExportDir,
    #[error("browser refused the export: {0}")]
    Browser(&'static str),
    #[error("could not rasterize snapshot: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bars,
    Tiles,
    Donut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Svg,
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Svg,
        ExportFormat::Png,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
            ExportFormat::Svg => "SVG",
            ExportFormat::Png => "PNG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub label: &'static str,
    pub value: u64,
    /// Fraction of the card total, `0` when the total is empty.
    pub share: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartExport {
    /// Stable card identifier used in filenames.
    pub slug: &'static str,
    pub title: String,
    pub kind: ChartKind,
    pub theme: ThemeMode,
    pub total: u64,
    pub rows: Vec<ExportRow>,
}

impl ChartExport {
    pub fn from_counts<C: Category>(
        slug: &'static str,
        title: impl Into<String>,
        kind: ChartKind,
        theme: ThemeMode,
        counts: &CategoryCounts<C>,
        color_of: impl Fn(C) -> &'static str,
    ) -> Self {
        let total = counts.total();
        let rows = counts
            .iter()
            .map(|(category, value)| ExportRow {
                label: category.label(),
                value,
                share: share(value, total),
                color: color_of(category),
            })
            .collect();

        Self {
            slug,
            title: title.into(),
            kind,
            theme,
            total,
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::from("category,count,share\n");
        for row in &self.rows {
            csv.push_str(&escape_csv(row.label));
            csv.push(',');
            csv.push_str(&row.value.to_string());
            csv.push(',');
            csv.push_str(&format!("{:.4}", row.share));
            csv.push('\n');
        }
        csv
    }

    pub fn to_svg(&self) -> String {
        svg::render(self)
    }

    pub fn filename(&self, format: ExportFormat, stamp: &str) -> String {
        format!(
            "worklet-dash-{}-{stamp}.{}",
            self.slug,
            format.extension()
        )
    }
}

/// RFC 4180 field quoting.
pub fn escape_csv(value: &str) -> String {
    let needs_quotes =
        value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Build, deliver and describe one export. The returned message is shown in
/// the card's status line.
pub async fn run_export(export: ChartExport, format: ExportFormat) -> Result<String, ExportError> {
    let filename = export.filename(format, &deliver::timestamp_slug());
    let name = format.short_name();

    let outcome = match format {
        ExportFormat::Json => {
            let json = export.to_json()?;
            let copied = match deliver::copy_to_clipboard(json.clone()).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, card = export.slug, "clipboard copy skipped");
                    false
                }
            };
            let saved = deliver::download_bytes(&filename, format.mime(), json.into_bytes()).await?;
            match (copied, saved) {
                (true, Some(path)) => t!("export-copied-saved", path = path),
                (true, None) => t!("export-copied-downloaded"),
                (false, Some(path)) => t!("export-saved", format = name, path = path),
                (false, None) => t!("export-downloaded", format = name),
            }
        }
        ExportFormat::Csv | ExportFormat::Svg | ExportFormat::Png => {
            let bytes = match format {
                ExportFormat::Csv => export.to_csv().into_bytes(),
                ExportFormat::Svg => export.to_svg().into_bytes(),
                _ => deliver::rasterize(&export.to_svg()).await?,
            };
            match deliver::download_bytes(&filename, format.mime(), bytes).await? {
                Some(path) => t!("export-saved", format = name, path = path),
                None => t!("export-downloaded", format = name),
            }
        }
    };

    info!(card = export.slug, format = name, %filename, "export delivered");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::RiskLevel;
    use crate::theme::LIGHT;

    fn risk_export() -> ChartExport {
        let counts = CategoryCounts::<RiskLevel>::from_fn(|level| match level {
            RiskLevel::High => 3,
            RiskLevel::Medium => 5,
            RiskLevel::Low => 11,
        });
        ChartExport::from_counts(
            "risk",
            "Ongoing Worklet Risk",
            ChartKind::Donut,
            ThemeMode::Light,
            &counts,
            |level| LIGHT.risk_color(level),
        )
    }

    #[test]
    fn rows_follow_declared_order_with_shares() {
        let export = risk_export();
        assert_eq!(export.total, 19);
        let labels: Vec<_> = export.rows.iter().map(|row| row.label).collect();
        assert_eq!(labels, ["High Risk", "Medium Risk", "Low Risk"]);
        let shares: f64 = export.rows.iter().map(|row| row.share).sum();
        assert!((shares - 1.0).abs() < 1e-9);
    }

    #[test]
    fn csv_has_header_and_one_line_per_category() {
        let csv = risk_export().to_csv();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "category,count,share");
        assert_eq!(lines[1], "High Risk,3,0.1579");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn json_carries_title_and_rows() {
        let json: serde_json::Value =
            serde_json::from_str(&risk_export().to_json().unwrap()).unwrap();
        assert_eq!(json["title"], "Ongoing Worklet Risk");
        assert_eq!(json["kind"], "donut");
        assert_eq!(json["theme"], "light");
        assert_eq!(json["rows"][2]["value"], 11);
    }

    #[test]
    fn csv_escaping_quotes_only_when_needed() {
        assert_eq!(escape_csv("Low Risk"), "Low Risk");
        assert_eq!(escape_csv("R&D, Strategy"), "\"R&D, Strategy\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn filenames_are_slugged_and_stamped() {
        let export = risk_export();
        assert_eq!(
            export.filename(ExportFormat::Png, "20250101_120000"),
            "worklet-dash-risk-20250101_120000.png"
        );
        for format in ExportFormat::ALL {
            assert!(export
                .filename(format, "x")
                .ends_with(&format!(".{}", format.extension())));
        }
    }
}
