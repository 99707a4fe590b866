//! Platform-independent dashboard logic shared by the views.

pub mod download;
pub mod filters;
pub mod format;
pub mod pointer;
pub mod selection;
pub mod stats;
pub mod submission;
