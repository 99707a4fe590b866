use dioxus::prelude::*;

use super::dropdown::{is_activation_key, use_dropdown};
use crate::core::selection::{filter_options, remove_value, toggle_value};
use crate::t;

/// Multi-value dropdown; options toggle membership and the menu stays open.
#[component]
pub fn MultiSelect(
    label: String,
    placeholder: String,
    search_placeholder: String,
    options: Vec<String>,
    selected: Vec<String>,
    on_change: EventHandler<Vec<String>>,
) -> Element {
    let dropdown = use_dropdown();
    let open = dropdown.is_open();
    let query = dropdown.query();
    let visible: Vec<String> = filter_options(&options, &query)
        .into_iter()
        .cloned()
        .collect();

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
                    if selected.is_empty() {
                        span { class: "dropdown__placeholder", "{placeholder}" }
                    } else {
                        span { class: "dropdown__value",
                            {t!("filters-selected-count", count = selected.len())}
                        }
                    }
                    span { class: "dropdown__chevron", aria_hidden: "true",
                        if open { "▴" } else { "▾" }
                    }
                }

                if open {
                    div { class: "dropdown__menu", role: "listbox", aria_multiselectable: "true",
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
                            CheckOption {
                                key: "{option}",
                                checked: selected.contains(&option),
                                on_toggle: {
                                    let selected = selected.clone();
                                    move |value: String| on_change.call(toggle_value(&selected, &value))
                                },
                                option: option.clone(),
                            }
                        }
                    }
                }
            }

            if !selected.is_empty() {
                div { class: "chips",
                    for value in selected.clone() {
                        span { key: "{value}", class: "chip",
                            "{value}"
                            button {
                                r#type: "button",
                                class: "chip__remove",
                                aria_label: t!("filters-remove", value = value.clone()),
                                onclick: {
                                    let selected = selected.clone();
                                    let value = value.clone();
                                    move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        on_change.call(remove_value(&selected, &value));
                                    }
                                },
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Option row with a checkbox marker, shared by the multi-value dropdowns.
#[component]
pub(super) fn CheckOption(
    option: String,
    checked: bool,
    #[props(default)] disabled: bool,
    #[props(default)] note: Option<String>,
    on_toggle: EventHandler<String>,
) -> Element {
    let toggle = {
        let option = option.clone();
        move || {
            if !disabled {
                on_toggle.call(option.clone());
            }
        }
    };
    let key_toggle = toggle.clone();

    let mut class = String::from("dropdown__option");
    if checked {
        class.push_str(" dropdown__option--selected");
    }
    if disabled {
        class.push_str(" dropdown__option--disabled");
    }

    rsx! {
        div {
            class: "{class}",
            role: "option",
            tabindex: if disabled { "-1" } else { "0" },
            aria_selected: "{checked}",
            aria_disabled: "{disabled}",
            onclick: move |_| toggle(),
            onkeydown: move |evt| {
                if is_activation_key(&evt) {
                    evt.prevent_default();
                    key_toggle();
                }
            },
            span { class: "dropdown__check", aria_hidden: "true",
                if checked { "☑" } else { "☐" }
            }
            span { "{option}" }
            if let Some(note) = note {
                span { class: "dropdown__note", "{note}" }
            }
        }
    }
}
