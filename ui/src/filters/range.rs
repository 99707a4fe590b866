use dioxus::prelude::*;

use crate::core::filters::{set_range_end, RangeEnd, SliderBounds};

/// Two sliders editing the lower and upper end of a range.
#[component]
pub fn RangeField(
    label: String,
    bounds: SliderBounds,
    value: [u32; 2],
    // Renders a slider value for display.
    format: Callback<u32, String>,
    lower_label: String,
    upper_label: String,
    on_change: EventHandler<[u32; 2]>,
) -> Element {
    rsx! {
        div { class: "filter-field filter-range",
            span { class: "filter-field__label", "{label}" }
            RangeSlider {
                caption: lower_label,
                bounds,
                current: value[0],
                display: format.call(value[0]),
                on_input: move |v| on_change.call(set_range_end(value, RangeEnd::Lower, v)),
            }
            RangeSlider {
                caption: upper_label,
                bounds,
                current: value[1],
                display: format.call(value[1]),
                on_input: move |v| on_change.call(set_range_end(value, RangeEnd::Upper, v)),
            }
        }
    }
}

#[component]
fn RangeSlider(
    caption: String,
    bounds: SliderBounds,
    current: u32,
    display: String,
    on_input: EventHandler<u32>,
) -> Element {
    let track = bounds.track_gradient(current);

    rsx! {
        label { class: "filter-range__row",
            span { class: "filter-range__caption", "{caption}" }
            input {
                class: "filter-range__slider",
                r#type: "range",
                min: "{bounds.min}",
                max: "{bounds.max}",
                step: "{bounds.step}",
                value: "{current}",
                style: "background: {track}",
                oninput: move |evt| {
                    if let Some(v) = bounds.parse(&evt.value()) {
                        on_input.call(v);
                    }
                },
            }
            span { class: "filter-range__value", "{display}" }
        }
    }
}
