use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::theme::{provide_theme, ThemeMode, THEME_CSS};
use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Dashboard {},
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    provide_theme(ThemeMode::Light);

    // The header writes the selected locale here; keying on it remounts the
    // routed tree so every `t!` call re-runs.
    let lang_code = use_signal(|| ui::i18n::FALLBACK_LANGUAGE.to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Style { "{THEME_CSS}" }

        div {
            key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

#[component]
fn WebShell() -> Element {
    rsx! {
        Outlet::<Route> {}
    }
}
