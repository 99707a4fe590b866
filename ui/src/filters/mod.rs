//! Filter form: range sliders, dropdowns and submission to the analytics proxy.

mod dropdown;
mod multi_select;
mod range;
mod searchable_select;
mod source_select;

pub use multi_select::MultiSelect;
pub use range::RangeField;
pub use searchable_select::SearchableSelect;
pub use source_select::SourceSelect;

use api::{FilterSelection, SourceRef};
use dioxus::logger::tracing::{debug, error, info, warn};
use dioxus::prelude::*;

use crate::core::filters::{validate, FilterError, EXPERIENCE_BOUNDS, SALARY_BOUNDS};
use crate::core::format::format_rubles;
use crate::core::submission::{SubmissionTracker, SubmittedAnalysis};
use crate::i18n;
use crate::t;

fn invalid_message(err: &FilterError) -> String {
    match err {
        FilterError::SalaryRangeInverted { .. } => t!("filters-error-salary-inverted"),
        FilterError::ExperienceRangeInverted { .. } => t!("filters-error-experience-inverted"),
    }
}

fn salary_display(value: u32) -> String {
    format_rubles(value as f64, &i18n::thousands_separator())
}

fn years_display(value: u32) -> String {
    t!("filters-years-value", count = value)
}

#[component]
pub fn FilterPanel(
    positions: Vec<String>,
    regions: Vec<String>,
    companies: Vec<String>,
    sources: Vec<SourceRef>,
    loading: bool,
    on_results: EventHandler<SubmittedAnalysis>,
    on_loading: EventHandler<bool>,
) -> Element {
    let mut filters = use_signal(FilterSelection::default);
    let mut tracker = use_signal(SubmissionTracker::default);
    let mut invalid = use_signal(|| None::<FilterError>);
    let rubles = use_callback(salary_display);
    let years = use_callback(years_display);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if loading {
            return;
        }

        let snapshot = filters.read().clone();
        if let Err(err) = validate(&snapshot) {
            warn!(%err, "filter selection rejected");
            invalid.set(Some(err));
            return;
        }
        invalid.set(None);

        let ticket = tracker.write().begin();
        on_loading.call(true);
        info!(
            position = %snapshot.position,
            regions = snapshot.regions.len(),
            sources = snapshot.sources.len(),
            "submitting analysis"
        );

        spawn(async move {
            let outcome = api::run_analysis(snapshot.clone()).await;
            if !tracker.peek().is_current(ticket) {
                debug!("discarding stale analysis response");
                return;
            }
            match outcome {
                Ok(result) => on_results.call(SubmittedAnalysis {
                    filters: snapshot,
                    result,
                }),
                Err(err) => error!(%err, "analysis request failed"),
            }
            on_loading.call(false);
        });
    };

    let current = filters.read().clone();

    rsx! {
        form { class: "filter-panel", onsubmit: submit,
            h2 { class: "filter-panel__title", {t!("filters-title")} }

            div { class: "filter-panel__grid",
                RangeField {
                    label: t!("filters-salary"),
                    bounds: SALARY_BOUNDS,
                    value: current.salary_range,
                    format: rubles,
                    lower_label: t!("filters-range-from"),
                    upper_label: t!("filters-range-to"),
                    on_change: move |range| filters.write().salary_range = range,
                }

                SearchableSelect {
                    label: t!("filters-position"),
                    placeholder: t!("filters-position-placeholder"),
                    search_placeholder: t!("filters-position-search"),
                    options: positions,
                    value: current.position.clone(),
                    on_change: move |value| filters.write().position = value,
                }

                MultiSelect {
                    label: t!("filters-regions"),
                    placeholder: t!("filters-regions-placeholder"),
                    search_placeholder: t!("filters-regions-search"),
                    options: regions,
                    selected: current.regions.clone(),
                    on_change: move |values| filters.write().regions = values,
                }

                MultiSelect {
                    label: t!("filters-companies"),
                    placeholder: t!("filters-companies-placeholder"),
                    search_placeholder: t!("filters-companies-search"),
                    options: companies,
                    selected: current.companies.clone(),
                    on_change: move |values| filters.write().companies = values,
                }

                SourceSelect {
                    label: t!("filters-sources"),
                    placeholder: t!("filters-sources-placeholder"),
                    search_placeholder: t!("filters-sources-search"),
                    options: sources,
                    selected: current.sources.clone(),
                    on_change: move |values| filters.write().sources = values,
                }

                RangeField {
                    label: t!("filters-experience"),
                    bounds: EXPERIENCE_BOUNDS,
                    value: current.experience_range,
                    format: years,
                    lower_label: t!("filters-range-from"),
                    upper_label: t!("filters-range-to"),
                    on_change: move |range| filters.write().experience_range = range,
                }

                div { class: "filter-panel__actions",
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: loading,
                        {t!("filters-apply")}
                    }
                }
            }

            if let Some(err) = invalid() {
                p { class: "filter-panel__error", role: "alert", {invalid_message(&err)} }
            }
        }
    }
}
