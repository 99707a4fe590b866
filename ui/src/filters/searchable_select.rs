use dioxus::prelude::*;

use super::dropdown::{is_activation_key, use_dropdown};
use crate::core::selection::filter_options;
use crate::t;

/// Single-value dropdown with a search box. Picking an option closes it.
#[component]
pub fn SearchableSelect(
    label: String,
    placeholder: String,
    search_placeholder: String,
    options: Vec<String>,
    value: String,
    on_change: EventHandler<String>,
) -> Element {
    let dropdown = use_dropdown();
    let open = dropdown.is_open();
    let query = dropdown.query();
    let visible: Vec<String> = filter_options(&options, &query)
        .into_iter()
        .cloned()
        .collect();
    let has_value = !value.is_empty();

    rsx! {
        div { class: "filter-field",
            span { class: "filter-field__label", "{label}" }
            div { id: "{dropdown.region_id()}", class: "dropdown",
                div {
                    class: if open { "dropdown__trigger dropdown__trigger--open" } else { "dropdown__trigger" },
                    role: "button",
                    tabindex: "0",
                    aria_expanded: "{open}",
                    onclick: move |_| dropdown.toggle(),
                    onkeydown: move |evt| {
                        if is_activation_key(&evt) {
                            evt.prevent_default();
                            dropdown.toggle();
                        }
                    },
                    if has_value {
                        span { class: "dropdown__value", "{value}" }
                        button {
                            r#type: "button",
                            class: "dropdown__clear",
                            aria_label: t!("filters-clear"),
                            onclick: move |evt| {
                                evt.stop_propagation();
                                on_change.call(String::new());
                            },
                            "×"
                        }
                    } else {
                        span { class: "dropdown__placeholder", "{placeholder}" }
                    }
                    span { class: "dropdown__chevron", aria_hidden: "true",
                        if open { "▴" } else { "▾" }
                    }
                }

                if open {
                    div { class: "dropdown__menu", role: "listbox",
                        input {
                            class: "dropdown__search",
                            r#type: "text",
                            autofocus: true,
                            placeholder: "{search_placeholder}",
                            value: "{query}",
                            oninput: move |evt| dropdown.set_query(evt.value()),
                        }
                        if visible.is_empty() {
                            div { class: "dropdown__empty", {t!("filters-nothing-found")} }
                        }
                        for option in visible {
                            SingleOption {
                                key: "{option}",
                                selected: option == value,
                                on_pick: move |picked: String| {
                                    on_change.call(picked);
                                    dropdown.dismiss();
                                },
                                option: option.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SingleOption(option: String, selected: bool, on_pick: EventHandler<String>) -> Element {
    let pick = {
        let option = option.clone();
        move || on_pick.call(option.clone())
    };
    let key_pick = pick.clone();

    rsx! {
        div {
            class: if selected { "dropdown__option dropdown__option--selected" } else { "dropdown__option" },
            role: "option",
            tabindex: "0",
            aria_selected: "{selected}",
            onclick: move |_| pick(),
            onkeydown: move |evt| {
                if is_activation_key(&evt) {
                    evt.prevent_default();
                    key_pick();
                }
            },
            "{option}"
        }
    }
}
