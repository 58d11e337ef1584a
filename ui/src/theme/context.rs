//! The one piece of process-wide theme state.
//!
//! Launchers call [`provide_theme`] once at the root. Components read the mode
//! through [`use_theme_mode`]; reading the signal subscribes them, so flipping
//! the mode re-renders every reader with the other palette.

use dioxus::prelude::*;
use tracing::debug;

use super::ThemeMode;
use crate::t;

pub fn provide_theme(initial: ThemeMode) -> Signal<ThemeMode> {
    use_context_provider(|| Signal::new(initial))
}

/// Current mode signal; falls back to a local light-mode signal when no
/// provider is mounted (e.g. a component rendered in isolation).
pub fn use_theme_mode() -> Signal<ThemeMode> {
    use_hook(|| {
        try_consume_context::<Signal<ThemeMode>>().unwrap_or_else(|| Signal::new(ThemeMode::Light))
    })
}

#[component]
pub fn ThemeToggle() -> Element {
    let mut mode = use_theme_mode();

    let (icon, label) = match mode() {
        ThemeMode::Light => ("☾", t!("theme-switch-dark")),
        ThemeMode::Dark => ("☀", t!("theme-switch-light")),
    };

    rsx! {
        button {
            r#type: "button",
            class: "theme-toggle",
            title: "{label}",
            aria_label: "{label}",
            onclick: move |_| {
                let next = mode().toggled();
                debug!(%next, "theme toggled");
                mode.set(next);
            },
            span { aria_hidden: "true", "{icon}" }
        }
    }
}
