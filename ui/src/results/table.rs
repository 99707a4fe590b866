use api::VacancyRow;
use dioxus::prelude::*;

use crate::core::format::format_rubles;
use crate::i18n;
use crate::t;

#[component]
pub fn VacancyTable(rows: Vec<VacancyRow>) -> Element {
    let separator = i18n::thousands_separator();

    if rows.is_empty() {
        return rsx! {
            p { class: "results-card__placeholder", {t!("table-empty")} }
        };
    }

    rsx! {
        div { class: "vacancy-table__scroll",
            table { class: "vacancy-table",
                thead {
                    tr {
                        th { {t!("table-position")} }
                        th { {t!("table-link")} }
                        th { {t!("table-salary")} }
                        th { {t!("table-experience")} }
                        th { {t!("table-region")} }
                    }
                }
                tbody {
                    for (idx, row) in rows.iter().enumerate() {
                        tr { key: "{idx}",
                            td { class: "vacancy-table__title", "{row.title}" }
                            td {
                                a {
                                    href: "{row.link}",
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    {t!("table-open-vacancy")}
                                }
                            }
                            td { class: "vacancy-table__salary",
                                {format_rubles(row.salary as f64, &separator)}
                            }
                            td { {t!("filters-years-value", count = row.experience)} }
                            td { "{row.region}" }
                        }
                    }
                }
            }
        }
    }
}
