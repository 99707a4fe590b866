use dioxus::prelude::*;

use super::view_model::DownloadSlot;

#[component]
pub fn ReportDownloads(
    summary: DownloadSlot,
    full: DownloadSlot,
    summary_label: String,
    full_label: String,
    summary_missing: String,
    full_missing: String,
) -> Element {
    rsx! {
        div { class: "report-downloads",
            DownloadEntry { slot: summary, label: summary_label, missing: summary_missing }
            DownloadEntry { slot: full, label: full_label, missing: full_missing }
        }
    }
}

#[component]
fn DownloadEntry(slot: DownloadSlot, label: String, missing: String) -> Element {
    match slot {
        DownloadSlot::Link { href, filename } => rsx! {
            a {
                class: "report-downloads__link",
                href: "{href}",
                download: "{filename}",
                span { class: "report-downloads__icon", aria_hidden: "true", "📄" }
                "{label}"
            }
        },
        DownloadSlot::Missing => rsx! {
            p { class: "report-downloads__missing", role: "status", "{missing}" }
        },
    }
}
