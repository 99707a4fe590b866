//! Shared UI crate for Vacancyscope: filter form, result views and the client
//! PDF report.

pub mod core;
pub mod filters;
pub mod i18n;
pub mod report;
pub mod results;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

use dioxus::prelude::*;

/// Shared theme, linked by the platform crate at the app root.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
