use dioxus::prelude::*;
use tracing::debug;

use super::Dropdown;
use crate::core::config::{SelectorState, CONFIG};
use crate::i18n;
use crate::t;
use crate::theme::ThemeToggle;

/// Sticky header: brand, the four scope selectors, locale switcher and theme
/// toggle.
///
/// Selections only update `selection`; nothing downstream filters on them.
#[component]
pub fn DashboardHeader(selection: Signal<SelectorState>) -> Element {
    i18n::init();

    // Platform-provided language code; writing it remounts the routed tree.
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let mut current_lang = use_signal(|| {
        lang_code_ctx
            .map(|code| code.peek().clone())
            .unwrap_or_else(|| i18n::FALLBACK_LANGUAGE.to_string())
    });
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_marker = lang_code_ctx.as_ref().map(|code| code()).unwrap_or_default();

    let on_lang_change = move |evt: FormEvent| {
        let value = evt.value();
        if i18n::set_language(&value).is_ok() {
            current_lang.set(value.clone());
            if let Some(mut code) = lang_code_ctx {
                code.set(value);
            }
        }
    };

    let mut selection = selection;
    let options = &CONFIG.selectors;
    let state = selection();

    rsx! {
        header { class: "dash-header",
            div { style: "display:none", "{lang_marker}" }
            div { class: "dash-header__brand",
                span { class: "dash-header__brand-mark", "Worklet" }
                span { class: "dash-header__brand-name",
                    span { class: "dash-header__brand-bracket", "[" }
                    "Dash"
                    span { class: "dash-header__brand-bracket", "]" }
                }
                span { class: "dash-header__tagline", {t!("tagline")} }
            }

            div { class: "dash-header__controls",
                Dropdown {
                    label: t!("selector-team"),
                    options: options.teams.clone(),
                    selected: state.team.clone(),
                    on_select: move |team: String| {
                        debug!(%team, "team selected");
                        selection.write().team = team;
                    },
                }
                Dropdown {
                    label: t!("selector-group"),
                    options: options.groups.clone(),
                    selected: state.group.clone(),
                    on_select: move |group: String| {
                        debug!(%group, "group selected");
                        selection.write().group = group;
                    },
                }
                Dropdown {
                    label: t!("selector-part"),
                    options: options.parts.clone(),
                    selected: state.part.clone(),
                    on_select: move |part: String| {
                        debug!(%part, "part selected");
                        selection.write().part = part;
                    },
                }
                Dropdown {
                    label: t!("selector-year"),
                    options: options.years.clone(),
                    selected: state.year.clone(),
                    on_select: move |year: String| {
                        debug!(%year, "year selected");
                        selection.write().year = year;
                    },
                }

                if show_switcher {
                    div { class: "dash-header__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_lang_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }

                ThemeToggle {}
            }
        }
    }
}
