#![cfg(test)]
//! Theme selector lint for the web build.
//!
//! Components rely on class names from the shared theme
//! (`ui/assets/theme/main.css`). A substring check catches a dropped or renamed
//! selector before it turns into a silent styling regression. When a selector
//! is renamed on purpose, update the component markup and `REQUIRED_SELECTORS`
//! together.

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    // Filter panel and dropdowns
    ".filter-panel",
    ".filter-panel__error",
    ".filter-range__slider",
    ".dropdown__trigger--open",
    ".dropdown__menu",
    ".dropdown__option--selected",
    ".dropdown__option--disabled",
    ".chip--muted",
    // Loading indicator
    ".dashboard__loading",
    ".dashboard__spinner",
    // Results
    ".results-card",
    ".results-card--error",
    ".results-card__meta--success",
    ".results-card__meta--error",
    ".results-highlight__value",
    ".gallery-modal",
    ".report-downloads__missing",
    ".results-chart__canvas",
    ".vacancy-table",
    ".results-export__actions",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors/tokens in the theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Theme appears unexpectedly small ({non_ws_len} non-whitespace chars); \
         did the file get truncated or the path change?"
    );
}

#[test]
fn navbar_styles_cover_brand_and_locale_switcher() {
    for token in [".navbar__brand-mark", ".navbar__link", ".navbar__locale"] {
        assert!(NAVBAR_CSS.contains(token), "`{token}` missing from navbar.css");
    }
}
