use dioxus::prelude::*;

use super::view_model::{GalleryItem, PLACEHOLDER_PNG};
use crate::t;

#[component]
pub fn ImageGallery(items: Vec<GalleryItem>) -> Element {
    let mut selected = use_signal(|| None::<GalleryItem>);

    if items.is_empty() {
        return rsx! {
            p { class: "results-card__placeholder", {t!("gallery-empty")} }
        };
    }

    rsx! {
        div { class: "gallery",
            for (idx, item) in items.into_iter().enumerate() {
                div { key: "{idx}", class: "gallery__item",
                    h4 { class: "gallery__name", "{item.name}" }
                    button {
                        r#type: "button",
                        class: "gallery__thumb",
                        aria_label: t!("gallery-open", name = item.name.clone()),
                        onclick: {
                            let item = item.clone();
                            move |_| selected.set(Some(item.clone()))
                        },
                        FallbackImage { src: item.src.clone(), alt: item.name.clone(), class: "gallery__image" }
                    }
                    p { class: "gallery__size", {t!("gallery-size", size = item.size_label.clone())} }
                }
            }
        }

        if let Some(item) = selected() {
            div {
                class: "gallery-modal",
                role: "dialog",
                aria_modal: "true",
                onclick: move |_| selected.set(None),
                div {
                    class: "gallery-modal__content",
                    // Clicks on the image or header must not reach the backdrop.
                    onclick: move |evt| evt.stop_propagation(),
                    button {
                        r#type: "button",
                        class: "gallery-modal__close",
                        aria_label: t!("gallery-close"),
                        onclick: move |evt| {
                            evt.stop_propagation();
                            selected.set(None);
                        },
                        "×"
                    }
                    div { class: "gallery-modal__header",
                        h3 { "{item.name}" }
                        p { {t!("gallery-size", size = item.size_label.clone())} }
                    }
                    FallbackImage { src: item.src.clone(), alt: item.name.clone(), class: "gallery-modal__image" }
                }
            }
        }
    }
}

/// `img` that swaps to a transparent pixel if the browser cannot decode it.
#[component]
fn FallbackImage(src: String, alt: String, class: String) -> Element {
    let mut broken = use_signal(|| false);
    let shown = if broken() {
        format!("data:image/png;base64,{PLACEHOLDER_PNG}")
    } else {
        src
    };

    rsx! {
        img {
            class: "{class}",
            src: "{shown}",
            alt: "{alt}",
            decoding: "async",
            onerror: move |_| broken.set(true),
        }
    }
}
