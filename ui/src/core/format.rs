//! Formatting helpers for presenting salaries and sizes.

/// Group the integer digits of `value` in threes using `separator`.
pub fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Rounded, grouped amount. Non-finite values render as a dash.
pub fn format_amount(value: f64, separator: &str) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let rounded = value.round();
    let grouped = group_thousands(rounded.abs() as u64, separator);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_rubles(value: f64, separator: &str) -> String {
    format!("{} ₽", format_amount(value, separator))
}

pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_thousands() {
        assert_eq!(group_thousands(0, ","), "0");
        assert_eq!(group_thousands(999, ","), "999");
        assert_eq!(group_thousands(1_000, ","), "1,000");
        assert_eq!(group_thousands(1_234_567, "\u{a0}"), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn amounts_round_before_grouping() {
        assert_eq!(format_amount(165_000.5, ","), "165,001");
        assert_eq!(format_amount(-2_500.0, ","), "-2,500");
        assert_eq!(format_amount(f64::NAN, ","), "—");
        assert_eq!(format_rubles(200_000.0, " "), "200 000 ₽");
    }

    #[test]
    fn kilobytes_keep_one_decimal() {
        assert_eq!(format_kilobytes(1536), "1.5 KB");
        assert_eq!(format_kilobytes(0), "0.0 KB");
    }
}
