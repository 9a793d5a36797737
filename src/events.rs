use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::EnhanceError;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Owns every DOM listener this crate registers. Dropping the hub detaches them all.
#[derive(Default)]
pub struct EventHub {
    listeners: RefCell<Vec<Listener>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen<F>(
        &self,
        target: &EventTarget,
        kind: &'static str,
        handler: F,
    ) -> Result<(), EnhanceError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let js_fn = callback.as_ref().unchecked_ref();
        target.add_event_listener_with_callback(kind, js_fn)?;
        self.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn clear(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            let js_fn = listener.callback.as_ref().unchecked_ref();
            let _ = listener
                .target
                .remove_event_listener_with_callback(listener.kind, js_fn);
        }
    }
}

impl Drop for EventHub {
    fn drop(&mut self) {
        self.clear();
    }
}
