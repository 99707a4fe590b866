//! Pure state transitions behind the searchable dropdowns.
//!
//! Components keep a [`DropdownState`] per instance and route every user
//! action through the helpers here, so the behavior can be checked without a
//! renderer.

use api::SourceRef;

/// Anything that can be listed in a dropdown by a display name.
pub trait OptionLabel {
    fn label(&self) -> &str;
}

impl OptionLabel for String {
    fn label(&self) -> &str {
        self.as_str()
    }
}

impl OptionLabel for SourceRef {
    fn label(&self) -> &str {
        self.name.as_str()
    }
}

/// Case-insensitive substring match. An empty query matches everything.
pub fn matches_query(label: &str, query: &str) -> bool {
    label.to_lowercase().contains(&query.to_lowercase())
}

pub fn filter_options<'a, T: OptionLabel>(options: &'a [T], query: &str) -> Vec<&'a T> {
    options
        .iter()
        .filter(|option| matches_query(option.label(), query))
        .collect()
}

/// Open/closed flag plus the search text typed into an open dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownState {
    pub open: bool,
    pub query: String,
}

impl DropdownState {
    pub fn toggle(&mut self) {
        if self.open {
            self.dismiss();
        } else {
            self.open = true;
        }
    }

    /// Close and forget the search text.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }
}

/// Add `value` when absent, remove it when present.
pub fn toggle_value(selection: &[String], value: &str) -> Vec<String> {
    if selection.iter().any(|v| v == value) {
        remove_value(selection, value)
    } else {
        let mut next = selection.to_vec();
        next.push(value.to_string());
        next
    }
}

pub fn remove_value(selection: &[String], value: &str) -> Vec<String> {
    selection.iter().filter(|v| *v != value).cloned().collect()
}

pub fn is_source_selected(selection: &[SourceRef], name: &str) -> bool {
    selection.iter().any(|s| s.name == name)
}

/// Toggle a source by name. Unavailable sources leave the selection untouched.
pub fn toggle_source(selection: &[SourceRef], option: &SourceRef) -> Vec<SourceRef> {
    if !option.availability {
        return selection.to_vec();
    }
    if is_source_selected(selection, &option.name) {
        remove_source(selection, &option.name)
    } else {
        let mut next = selection.to_vec();
        next.push(option.clone());
        next
    }
}

pub fn remove_source(selection: &[SourceRef], name: &str) -> Vec<SourceRef> {
    selection.iter().filter(|s| s.name != name).cloned().collect()
}

/// Current availability of a source, looked up by name among the offered
/// options. A source no longer offered counts as unavailable.
pub fn source_available(options: &[SourceRef], name: &str) -> bool {
    options
        .iter()
        .find(|o| o.name == name)
        .is_some_and(|o| o.availability)
}
