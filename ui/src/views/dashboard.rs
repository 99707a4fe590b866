use api::SourceRef;
use dioxus::prelude::*;

use crate::core::submission::SubmittedAnalysis;
use crate::filters::FilterPanel;
use crate::results::AnalyticsResults;
use crate::t;

fn positions() -> Vec<String> {
    ["Frontend Developer", "Backend Developer", "DevOps"]
        .map(String::from)
        .to_vec()
}

fn regions() -> Vec<String> {
    ["Москва", "Санкт-Петербург", "Новосибирск"]
        .map(String::from)
        .to_vec()
}

fn companies() -> Vec<String> {
    ["Яндекс", "Сбер", "Тинькофф"].map(String::from).to_vec()
}

fn sources() -> Vec<SourceRef> {
    vec![
        SourceRef::new(1, "hh.ru", "https://hh.ru", true),
        SourceRef::new(2, "habr.com", "https://career.habr.com", true),
        SourceRef::new(3, "superjob.ru", "https://www.superjob.ru", false),
    ]
}

#[component]
pub fn Dashboard() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let mut results = use_signal(|| None::<SubmittedAnalysis>);
    let mut loading = use_signal(|| false);

    rsx! {
        section { class: "page page-dashboard",
            h1 { {t!("dashboard-title")} }

            FilterPanel {
                positions: positions(),
                regions: regions(),
                companies: companies(),
                sources: sources(),
                loading: loading(),
                on_results: move |submitted| results.set(Some(submitted)),
                on_loading: move |state| loading.set(state),
            }

            if loading() {
                div { class: "dashboard__loading", role: "status",
                    span { class: "dashboard__spinner", aria_hidden: "true" }
                    {t!("dashboard-loading")}
                }
            } else if let Some(submitted) = results() {
                AnalyticsResults { submitted }
            }
        }
    }
}
