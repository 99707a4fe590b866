//! Process-wide "pointer pressed outside region" notifications.
//!
//! Dropdowns subscribe while open and drop their [`Subscription`] when they
//! close or unmount. On the web a single `mousedown` listener on the document
//! feeds the hub; it is installed with the first subscriber and removed with
//! the last one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

struct Listener {
    id: u64,
    region_id: String,
    on_outside: Callback,
}

#[derive(Default)]
pub struct PointerHub {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
    #[cfg(target_arch = "wasm32")]
    source: RefCell<Option<web::DocumentListener>>,
}

thread_local! {
    static HUB: PointerHub = PointerHub::default();
}

/// Live registration; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The hub may already be gone during thread teardown.
        let _ = HUB.try_with(|hub| hub.remove(self.id));
    }
}

/// Call `on_outside` whenever a pointer goes down outside the element `region_id`.
pub fn subscribe(region_id: impl Into<String>, on_outside: impl Fn() + 'static) -> Subscription {
    HUB.with(|hub| hub.add(region_id.into(), Rc::new(on_outside)))
}

/// Feed a pointer-down into the hub. `inside` reports whether the pointer hit
/// the given region.
pub fn dispatch(inside: impl Fn(&str) -> bool) {
    HUB.with(|hub| hub.dispatch(inside));
}

pub fn subscriber_count() -> usize {
    HUB.with(|hub| hub.listeners.borrow().len())
}

impl PointerHub {
    fn add(&self, region_id: String, on_outside: Callback) -> Subscription {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);
        self.listeners.borrow_mut().push(Listener {
            id,
            region_id,
            on_outside,
        });

        #[cfg(target_arch = "wasm32")]
        {
            let mut source = self.source.borrow_mut();
            if source.is_none() {
                *source = web::DocumentListener::install();
            }
        }

        Subscription { id }
    }

    fn remove(&self, id: u64) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| l.id != id);

        #[cfg(target_arch = "wasm32")]
        if listeners.is_empty() {
            // We may be running inside the listener's own closure; detach it
            // once the current event has finished.
            if let Some(source) = self.source.borrow_mut().take() {
                wasm_bindgen_futures::spawn_local(async move { drop(source) });
            }
        }
    }

    fn dispatch(&self, inside: impl Fn(&str) -> bool) {
        // Callbacks may close dropdowns and drop subscriptions, so they run
        // after the borrow is released.
        let due: Vec<Callback> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| !inside(&l.region_id))
            .map(|l| l.on_outside.clone())
            .collect();
        for callback in due {
            callback();
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{MouseEvent, Node};

    pub(super) struct DocumentListener {
        closure: Closure<dyn FnMut(MouseEvent)>,
    }

    impl DocumentListener {
        pub(super) fn install() -> Option<Self> {
            let document = web_sys::window()?.document()?;
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                let document = web_sys::window().and_then(|w| w.document());
                super::dispatch(|region_id| {
                    let region = document
                        .as_ref()
                        .and_then(|doc| doc.get_element_by_id(region_id));
                    match (region, target.as_ref()) {
                        (Some(region), Some(target)) => region.contains(Some(target)),
                        // Region not mounted: treat as outside.
                        _ => false,
                    }
                });
            });
            document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok()?;
            Some(Self { closure })
        }
    }

    impl Drop for DocumentListener {
        fn drop(&mut self) {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.remove_event_listener_with_callback(
                    "mousedown",
                    self.closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}
