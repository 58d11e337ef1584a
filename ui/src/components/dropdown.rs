use dioxus::prelude::*;

/// Button plus option menu. Picking an option reports it through `on_select`
/// and closes the menu; so does focus leaving the dropdown.
#[component]
pub fn Dropdown(
    label: String,
    options: Vec<String>,
    selected: String,
    on_select: EventHandler<String>,
) -> Element {
    let mut open = use_signal(|| false);

    let chevron_class = if open() {
        "dropdown__chevron dropdown__chevron--open"
    } else {
        "dropdown__chevron"
    };

    rsx! {
        div {
            class: "dropdown",
            onfocusout: move |_| open.set(false),
            button {
                r#type: "button",
                class: "dropdown__button",
                aria_label: "{label}",
                aria_haspopup: "listbox",
                aria_expanded: "{open()}",
                onclick: move |_| open.set(!open()),
                "{selected}"
                span { class: chevron_class, aria_hidden: "true", "▾" }
            }
            if open() {
                div { class: "dropdown__menu", role: "listbox",
                    for option in options.iter().cloned() {
                        button {
                            key: "{option}",
                            r#type: "button",
                            role: "option",
                            class: if option == selected { "dropdown__item dropdown__item--selected" } else { "dropdown__item" },
                            // mousedown keeps focus on the toggle, so the
                            // focusout above does not close the menu first.
                            onmousedown: {
                                let option = option.clone();
                                move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    on_select.call(option.clone());
                                    open.set(false);
                                }
                            },
                            "{option}"
                        }
                    }
                }
            }
        }
    }
}
