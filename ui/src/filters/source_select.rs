use api::SourceRef;
use dioxus::prelude::*;

use super::dropdown::{is_activation_key, use_dropdown};
use super::multi_select::CheckOption;
use crate::core::selection::{
    filter_options, is_source_selected, remove_source, source_available, toggle_source,
};
use crate::t;

/// Multi-select over data sources. Unavailable sources are listed but inert.
#[component]
pub fn SourceSelect(
    label: String,
    placeholder: String,
    search_placeholder: String,
    options: Vec<SourceRef>,
    selected: Vec<SourceRef>,
    on_change: EventHandler<Vec<SourceRef>>,
) -> Element {
    let dropdown = use_dropdown();
    let open = dropdown.is_open();
    let query = dropdown.query();
    let visible: Vec<SourceRef> = filter_options(&options, &query)
        .into_iter()
        .cloned()
        .collect();
    let chips: Vec<(SourceRef, bool)> = selected
        .iter()
        .map(|s| (s.clone(), source_available(&options, &s.name)))
        .collect();
    let unavailable_note = t!("filters-source-unavailable");

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
                        for source in visible {
                            CheckOption {
                                key: "{source.id}",
                                option: source.name.clone(),
                                checked: is_source_selected(&selected, &source.name),
                                disabled: !source.availability,
                                note: (!source.availability).then(|| unavailable_note.clone()),
                                on_toggle: {
                                    let selected = selected.clone();
                                    let source = source.clone();
                                    move |_: String| on_change.call(toggle_source(&selected, &source))
                                },
                            }
                        }
                    }
                }
            }

            if !selected.is_empty() {
                div { class: "chips",
                    for (source, available) in chips {
                        span {
                            key: "{source.id}",
                            class: if available { "chip" } else { "chip chip--muted" },
                            "{source.name}"
                            if !available {
                                span { class: "chip__note", "{unavailable_note}" }
                            }
                            button {
                                r#type: "button",
                                class: "chip__remove",
                                aria_label: t!("filters-remove", value = source.name.clone()),
                                onclick: {
                                    let selected = selected.clone();
                                    let name = source.name.clone();
                                    move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        on_change.call(remove_source(&selected, &name));
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
