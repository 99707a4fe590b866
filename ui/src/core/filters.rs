//! Slider domains and validation for the filter selection.

use api::FilterSelection;

/// Inclusive slider domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderBounds {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

pub const SALARY_BOUNDS: SliderBounds = SliderBounds {
    min: 30_000,
    max: 1_000_000,
    step: 10_000,
};

pub const EXPERIENCE_BOUNDS: SliderBounds = SliderBounds {
    min: 0,
    max: 20,
    step: 1,
};

impl SliderBounds {
    /// Position of `value` inside the domain, 0–100.
    pub fn percent(&self, value: u32) -> f64 {
        let span = self.max.saturating_sub(self.min);
        if span == 0 {
            return 0.0;
        }
        let offset = value.clamp(self.min, self.max) - self.min;
        offset as f64 / span as f64 * 100.0
    }

    /// Parse raw slider input, clamped to the domain.
    pub fn parse(&self, raw: &str) -> Option<u32> {
        let value = raw.trim().parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some((value.round().max(0.0) as u32).clamp(self.min, self.max))
    }

    /// CSS background for a filled slider track.
    pub fn track_gradient(&self, value: u32) -> String {
        let pct = self.percent(value);
        format!(
            "linear-gradient(to right, #22c55e 0%, #22c55e {pct:.2}%, #ffffff {pct:.2}%, #e5e7eb 100%)"
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Lower,
    Upper,
}

pub fn set_range_end(range: [u32; 2], end: RangeEnd, value: u32) -> [u32; 2] {
    match end {
        RangeEnd::Lower => [value, range[1]],
        RangeEnd::Upper => [range[0], value],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("salary range is inverted ({min} > {max})")]
    SalaryRangeInverted { min: u32, max: u32 },
    #[error("experience range is inverted ({min} > {max})")]
    ExperienceRangeInverted { min: u32, max: u32 },
}

/// Inverted ranges are rejected before submission.
pub fn validate(filters: &FilterSelection) -> Result<(), FilterError> {
    let [min, max] = filters.salary_range;
    if min > max {
        return Err(FilterError::SalaryRangeInverted { min, max });
    }
    let [min, max] = filters.experience_range;
    if min > max {
        return Err(FilterError::ExperienceRangeInverted { min, max });
    }
    Ok(())
}
