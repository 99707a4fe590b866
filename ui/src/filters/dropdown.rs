//! Shared open/search state and outside-click dismissal for dropdowns.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::pointer::{self, Subscription};
use crate::core::selection::DropdownState;

#[derive(Clone, Copy, PartialEq)]
pub struct Dropdown {
    region: Signal<String>,
    state: Signal<DropdownState>,
}

impl Dropdown {
    /// DOM id of the element that counts as "inside" the dropdown.
    pub fn region_id(&self) -> String {
        self.region.peek().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.read().open
    }

    pub fn query(&self) -> String {
        self.state.read().query.clone()
    }

    pub fn toggle(&self) {
        let mut state = self.state;
        state.write().toggle();
    }

    pub fn dismiss(&self) {
        let mut state = self.state;
        state.write().dismiss();
    }

    pub fn set_query(&self, query: String) {
        let mut state = self.state;
        state.write().set_query(query);
    }
}

/// Dropdown state that registers with the pointer hub only while open.
pub fn use_dropdown() -> Dropdown {
    let region = use_signal(|| format!("dropdown-{}", uuid::Uuid::new_v4().simple()));
    let state = use_signal(DropdownState::default);
    let slot: Rc<RefCell<Option<Subscription>>> = use_hook(|| Rc::new(RefCell::new(None)));

    use_effect({
        let slot = slot.clone();
        move || {
            let open = state.read().open;
            let mut slot = slot.borrow_mut();
            if open && slot.is_none() {
                *slot = Some(pointer::subscribe(region.peek().clone(), move || {
                    let mut state = state;
                    state.write().dismiss();
                }));
            } else if !open {
                slot.take();
            }
        }
    });

    use_drop({
        let slot = slot.clone();
        move || {
            slot.borrow_mut().take();
        }
    });

    Dropdown { region, state }
}

/// Enter or Space, the keys that activate triggers and options.
pub fn is_activation_key(event: &KeyboardEvent) -> bool {
    matches!(event.key(), Key::Enter) || matches!(event.key(), Key::Character(ref c) if c == " ")
}
