use dioxus::prelude::*;

use crate::t;

#[component]
pub fn Home() -> Element {
    // Subscribe to the global language code so the page re-renders on change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { {t!("home-intro")} }

            ul { class: "page-home__features",
                li { {t!("home-feature-filters")} }
                li { {t!("home-feature-charts")} }
                li { {t!("home-feature-report")} }
            }
            p { class: "page-home__cta", {t!("home-cta")} }
        }
    }
}
