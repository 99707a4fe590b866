//! Aggregations over vacancy rows used by the charts and the client report.

use std::collections::BTreeMap;

use api::VacancyRow;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary<K> {
    pub key: K,
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Per-region salary distribution, ordered by region name.
pub type RegionSummary = GroupSummary<String>;

pub fn region_breakdown(rows: &[VacancyRow]) -> Vec<RegionSummary> {
    summarize_by(rows, |row| row.region.clone())
}

/// Salary distribution per position title.
pub fn title_breakdown(rows: &[VacancyRow]) -> Vec<GroupSummary<String>> {
    summarize_by(rows, |row| row.title.clone())
}

/// Salary distribution per whole year of required experience.
pub fn experience_breakdown(rows: &[VacancyRow]) -> Vec<GroupSummary<u32>> {
    summarize_by(rows, |row| row.experience)
}

fn summarize_by<K: Ord + Clone>(
    rows: &[VacancyRow],
    key_of: impl Fn(&VacancyRow) -> K,
) -> Vec<GroupSummary<K>> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(key_of(row))
            .or_default()
            .push(row.salary as f64);
    }

    groups
        .into_iter()
        .map(|(key, mut salaries)| {
            salaries.sort_by(|a, b| a.total_cmp(b));
            GroupSummary {
                key,
                mean: mean(&salaries),
                median: median(&salaries),
                count: salaries.len(),
            }
        })
        .collect()
}

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        0.0
    } else {
        data.iter().sum::<f64>() / data.len() as f64
    }
}

/// Median of already sorted data.
pub fn median(sorted: &[f64]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2],
        n => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

/// Regions whose average salary deviates from the overall average by at least
/// `threshold` (a fraction, e.g. `0.1`), largest deviation first.
pub fn notable_regions(rows: &[VacancyRow], threshold: f64) -> Vec<(RegionSummary, f64)> {
    let overall = mean(&rows.iter().map(|r| r.salary as f64).collect::<Vec<_>>());
    if overall <= 0.0 {
        return Vec::new();
    }

    let mut notable: Vec<(RegionSummary, f64)> = region_breakdown(rows)
        .into_iter()
        .map(|summary| {
            let deviation = (summary.mean - overall) / overall;
            (summary, deviation)
        })
        .filter(|(_, deviation)| deviation.abs() >= threshold)
        .collect();
    notable.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    notable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, salary: u32, experience: u32, region: &str) -> VacancyRow {
        VacancyRow {
            title: title.into(),
            link: String::new(),
            salary,
            experience,
            region: region.into(),
        }
    }

    fn sample() -> Vec<VacancyRow> {
        vec![
            row("Backend", 200_000, 3, "Москва"),
            row("Backend", 100_000, 1, "Новосибирск"),
            row("Frontend", 180_000, 3, "Москва"),
            row("DevOps", 220_000, 5, "Москва"),
            row("Frontend", 120_000, 1, "Новосибирск"),
        ]
    }

    #[test]
    fn median_handles_even_and_odd_lengths() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[1.0, 2.0, 9.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), 2.5);
    }

    #[test]
    fn region_breakdown_groups_and_sorts() {
        let regions = region_breakdown(&sample());
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].key, "Москва");
        assert_eq!(regions[0].count, 3);
        assert_eq!(regions[0].median, 200_000.0);
        assert_eq!(regions[1].mean, 110_000.0);
    }

    #[test]
    fn experience_breakdown_orders_by_years() {
        let years: Vec<u32> = experience_breakdown(&sample())
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(years, vec![1, 3, 5]);
    }

    #[test]
    fn notable_regions_respect_threshold() {
        let rows = sample();
        let notable = notable_regions(&rows, 0.1);
        assert_eq!(notable.len(), 2);
        assert!(notable.iter().any(|(r, d)| r.key == "Москва" && *d > 0.0));
        assert!(notable_regions(&rows, 0.9).is_empty());
        assert!(notable_regions(&[], 0.1).is_empty());
    }
}
