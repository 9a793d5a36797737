//! Fade-in reveal. One watcher is chosen at start-up: an `IntersectionObserver`
//! when the runtime has one, scroll polling otherwise.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Node, Window,
};

use crate::config::PageConfig;
use crate::counter::CounterAnimator;
use crate::dom;
use crate::error::EnhanceError;
use crate::rate_limit::{throttle, BrowserClock};
use crate::viewport;

type EntriesCallback = dyn FnMut(Array, IntersectionObserver);

pub trait VisibilityWatcher {
    fn name(&self) -> &'static str;

    /// Fed from the shared window scroll listener.
    fn on_scroll(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Ignore,
    Reveal,
    RevealAndCount,
}

/// What the observer does with one entry.
pub fn observed(is_intersecting: bool, is_stats: bool) -> Reaction {
    match (is_intersecting, is_stats) {
        (false, _) => Reaction::Ignore,
        (true, false) => Reaction::Reveal,
        (true, true) => Reaction::RevealAndCount,
    }
}

/// Polling only counts when the stats block has just come into view.
pub fn polled_stats(was_in_view: bool, in_view: bool) -> Reaction {
    if in_view && !was_in_view {
        Reaction::RevealAndCount
    } else {
        Reaction::Ignore
    }
}

/// Elements the watchers reveal, and the counters the stats block starts.
struct Targets {
    config: Rc<PageConfig>,
    fade_ins: Vec<Element>,
    stats: Option<Element>,
    counters: Rc<CounterAnimator>,
}

impl Targets {
    fn collect(document: &Document, config: Rc<PageConfig>, counters: Rc<CounterAnimator>) -> Self {
        Self {
            fade_ins: dom::query_all(document, &config.fade_in_selector),
            stats: dom::query(document, &config.stats_selector),
            config,
            counters,
        }
    }

    fn is_stats(&self, element: &Element) -> bool {
        let node: &Node = element.as_ref();
        self.stats
            .as_ref()
            .is_some_and(|stats| stats.is_same_node(Some(node)))
    }

    fn react(&self, element: &Element, reaction: Reaction) {
        if reaction == Reaction::Ignore {
            return;
        }
        dom::set_class(element, &self.config.visible_class, true);
        if reaction == Reaction::RevealAndCount {
            self.counters.start();
        }
    }
}

pub fn supports_observer(window: &Window) -> bool {
    Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

pub fn select(
    window: &Window,
    document: &Document,
    config: Rc<PageConfig>,
    counters: Rc<CounterAnimator>,
) -> Result<Box<dyn VisibilityWatcher>, EnhanceError> {
    let targets = Targets::collect(document, config, counters);
    let watcher: Box<dyn VisibilityWatcher> = if supports_observer(window) {
        Box::new(ObserverWatcher::observe(targets)?)
    } else {
        Box::new(PollingWatcher::start(window, targets))
    };
    info!("Fade-in watcher: {}", watcher.name());
    Ok(watcher)
}

struct PollCheck {
    window: Window,
    targets: Targets,
    stats_in_view: Cell<bool>,
}

impl PollCheck {
    fn run(&self) {
        let config = &self.targets.config;
        for element in &self.targets.fade_ins {
            if viewport::is_in_viewport(&self.window, element, config.poll_threshold) {
                self.targets.react(element, Reaction::Reveal);
            }
        }

        if let Some(stats) = &self.targets.stats {
            let in_view = viewport::is_in_viewport(&self.window, stats, config.observer_threshold);
            let reaction = polled_stats(self.stats_in_view.get(), in_view);
            self.targets.react(stats, reaction);
            self.stats_in_view.set(in_view);
        }
    }
}

pub struct PollingWatcher {
    throttled: RefCell<Box<dyn FnMut()>>,
}

impl PollingWatcher {
    fn start(window: &Window, targets: Targets) -> Self {
        let interval_ms = targets.config.poll_interval_ms;
        let check = Rc::new(PollCheck {
            window: window.clone(),
            targets,
            stats_in_view: Cell::new(false),
        });
        check.run();

        let throttled = throttle(BrowserClock, interval_ms, move || check.run());
        Self {
            throttled: RefCell::new(Box::new(throttled)),
        }
    }
}

impl VisibilityWatcher for PollingWatcher {
    fn name(&self) -> &'static str {
        "scroll polling"
    }

    fn on_scroll(&self) {
        (self.throttled.borrow_mut())();
    }
}

pub struct ObserverWatcher {
    observer: IntersectionObserver,
    _callback: Closure<EntriesCallback>,
}

impl ObserverWatcher {
    fn observe(targets: Targets) -> Result<Self, EnhanceError> {
        let options = IntersectionObserverInit::new();
        options.set_root_margin("0px");
        options.set_threshold(&JsValue::from_f64(targets.config.observer_threshold));

        let targets = Rc::new(targets);
        let on_entries = {
            let targets = targets.clone();
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let reaction = observed(entry.is_intersecting(), targets.is_stats(&target));
                    targets.react(&target, reaction);
                }
            }
        };
        let callback = Closure::wrap(Box::new(on_entries) as Box<EntriesCallback>);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for element in targets.fade_ins.iter().chain(targets.stats.iter()) {
            observer.observe(element);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl VisibilityWatcher for ObserverWatcher {
    fn name(&self) -> &'static str {
        "intersection observer"
    }
}

impl Drop for ObserverWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_ignores_entries_leaving_view() {
        assert_eq!(observed(false, false), Reaction::Ignore);
        assert_eq!(observed(false, true), Reaction::Ignore);
    }

    #[test]
    fn observer_counts_only_for_stats_block() {
        assert_eq!(observed(true, false), Reaction::Reveal);
        assert_eq!(observed(true, true), Reaction::RevealAndCount);
    }

    #[test]
    fn polling_counts_once_per_entry_into_view() {
        let positions = [false, true, true, false, true];
        let mut was_in_view = false;
        let mut reactions = Vec::new();
        for in_view in positions {
            reactions.push(polled_stats(was_in_view, in_view));
            was_in_view = in_view;
        }

        assert_eq!(
            reactions,
            vec![
                Reaction::Ignore,
                Reaction::RevealAndCount,
                Reaction::Ignore,
                Reaction::Ignore,
                Reaction::RevealAndCount,
            ]
        );
    }
}
