use dioxus::prelude::*;
use tracing::warn;

use crate::export::{run_export, ChartExport, ExportError, ExportFormat};
use crate::t;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(String),
    Done(String),
    Error(String),
}

/// Dashboard card: title, export menu and the chart body.
#[component]
pub fn Card(title: String, delay_s: f64, export: ChartExport, children: Element) -> Element {
    rsx! {
        section { class: "card", style: "animation-delay: {delay_s}s;",
            div { class: "card__header",
                h3 { class: "card__title", "{title}" }
                ExportMenu { export }
            }
            {children}
        }
    }
}

#[component]
fn ExportMenu(export: ChartExport) -> Element {
    let mut open = use_signal(|| false);
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(message) => Some(("card__status".to_string(), message.clone())),
        ExportStatus::Done(message) => Some((
            "card__status card__status--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "card__status card__status--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let start_export = move |format: ExportFormat| {
        let export = export.clone();
        let mut status_signal = status;
        let mut busy_signal = busy;
        let mut open_signal = open;
        move |evt: MouseEvent| {
            evt.prevent_default();
            open_signal.set(false);
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working(t!(
                "export-preparing",
                format = format.short_name()
            )));
            let export = export.clone();
            // Runs after this handler returns, so `Working` paints first.
            spawn(async move {
                let outcome = run_export(export, format).await;
                finish(outcome, status_signal, busy_signal);
            });
        }
    };

    rsx! {
        div { class: "export-menu", onfocusout: move |_| open.set(false),
            button {
                r#type: "button",
                class: "export-menu__button",
                disabled: busy(),
                aria_haspopup: "menu",
                aria_expanded: "{open()}",
                onclick: move |_| open.set(!open()),
                {t!("export-button")}
                span { aria_hidden: "true", " ⤓" }
            }
            if open() {
                div { class: "export-menu__list", role: "menu",
                    for format in ExportFormat::ALL {
                        button {
                            key: "{format.extension()}",
                            r#type: "button",
                            role: "menuitem",
                            class: "export-menu__item",
                            onmousedown: start_export(format),
                            {menu_label(format)}
                        }
                    }
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn menu_label(format: ExportFormat) -> String {
    match format {
        ExportFormat::Json => t!("export-json"),
        ExportFormat::Csv => t!("export-csv"),
        ExportFormat::Svg => t!("export-svg"),
        ExportFormat::Png => t!("export-png"),
    }
}

fn finish(
    outcome: Result<String, ExportError>,
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
) {
    match outcome {
        Ok(message) => status.set(ExportStatus::Done(message)),
        Err(err) => {
            warn!(%err, "export failed");
            status.set(ExportStatus::Error(t!("export-failed", reason = err.to_string())));
        }
    }
    busy.set(false);
}
