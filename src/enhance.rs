use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};
use web_sys::{Document, Event, HtmlElement, Window};

use crate::config::PageConfig;
use crate::counter::CounterAnimator;
use crate::dom;
use crate::error::EnhanceError;
use crate::events::EventHub;
use crate::load;
use crate::menu::MobileMenu;
use crate::navbar::Navbar;
use crate::parallax::Parallax;
use crate::purchase::PurchaseGuard;
use crate::smooth_scroll::SmoothScroll;
use crate::visibility::{self, VisibilityWatcher};

thread_local! {
    static STARTUP: RefCell<Option<EventHub>> = RefCell::new(None);
    static ENHANCER: RefCell<Option<Enhancer>> = RefCell::new(None);
}

/// Everything installed on the page. Listeners live as long as this does.
pub struct Enhancer {
    _hub: EventHub,
    _watcher: Rc<dyn VisibilityWatcher>,
}

struct Page {
    window: Window,
    document: Document,
    body: HtmlElement,
}

impl Page {
    fn current() -> Result<Self, EnhanceError> {
        let window = web_sys::window().ok_or(EnhanceError::NoWindow)?;
        let document = window.document().ok_or(EnhanceError::NoDocument)?;
        let body = document.body().ok_or(EnhanceError::NoBody)?;
        Ok(Self {
            window,
            document,
            body,
        })
    }
}

/// `document.readyState`; anything unrecognised is treated as still loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Loading,
    Interactive,
    Complete,
}

impl Readiness {
    fn of(state: &str) -> Self {
        match state {
            "interactive" => Readiness::Interactive,
            "complete" => Readiness::Complete,
            _ => Readiness::Loading,
        }
    }
}

/// Installs once the document structure is ready, and finalizes on full load.
pub fn start() -> Result<(), EnhanceError> {
    let page = Page::current()?;
    let hub = EventHub::new();

    match Readiness::of(&page.document.ready_state()) {
        Readiness::Loading => {
            hub.listen(&page.document, "DOMContentLoaded", |_| report(install()))?;
        }
        _ => report(install()),
    }

    match Readiness::of(&page.document.ready_state()) {
        Readiness::Complete => on_load(&page),
        _ => {
            hub.listen(&page.window, "load", |_| {
                if let Ok(page) = Page::current() {
                    on_load(&page);
                }
            })?;
        }
    }

    STARTUP.with(|slot| slot.borrow_mut().replace(hub));
    Ok(())
}

fn report(result: Result<(), EnhanceError>) {
    if let Err(e) = result {
        error!("Page enhancements not installed: {}", e);
    }
}

fn on_load(page: &Page) {
    let config = Rc::new(PageConfig::load(&page.document));
    load::finalize(&page.document, &page.body, config);
}

fn install() -> Result<(), EnhanceError> {
    let enhancer = Enhancer::install(&Page::current()?)?;
    ENHANCER.with(|slot| slot.borrow_mut().replace(enhancer));
    info!("Good Step website initialized");
    Ok(())
}

impl Enhancer {
    fn install(page: &Page) -> Result<Self, EnhanceError> {
        let Page {
            window,
            document,
            body,
        } = page;
        let config = Rc::new(PageConfig::load(document));
        let hub = EventHub::new();

        let counters = Rc::new(CounterAnimator::bind(document, &config));
        let watcher = visibility::select(window, document, config.clone(), counters)?;
        let watcher: Rc<dyn VisibilityWatcher> = Rc::from(watcher);

        let navbar = Navbar::bind(window, document, config.clone());
        let parallax = Parallax::bind(window, document, config.clone());
        {
            let watcher = watcher.clone();
            hub.listen(window, "scroll", move |_| {
                navbar.on_scroll();
                if let Some(parallax) = &parallax {
                    parallax.on_scroll();
                }
                watcher.on_scroll();
            })?;
        }

        if let Some(menu) = MobileMenu::bind(document, body, config.clone()) {
            hub.listen(document, "click", move |e| menu.on_click(&e))?;
        }

        let scroller = Rc::new(SmoothScroll::new(window, document, config.clone()));
        for anchor in dom::query_all(document, &config.anchor_selector) {
            let scroller = scroller.clone();
            let href_source = anchor.clone();
            hub.listen(&anchor, "click", move |e: Event| {
                let href = href_source.get_attribute("href");
                scroller.on_anchor_click(href.as_deref(), &e);
            })?;
        }

        let guard = Rc::new(PurchaseGuard::new(window, config.clone()));
        for link in dom::query_all(document, &config.purchase_selector) {
            let guard = guard.clone();
            let href_source = link.clone();
            hub.listen(&link, "click", move |e: Event| {
                let href = href_source.get_attribute("href");
                guard.on_click(href.as_deref(), &e);
            })?;
        }

        debug!("Registered {} page listeners", hub.len());
        Ok(Self {
            _hub: hub,
            _watcher: watcher,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_strings_map_to_phases() {
        assert_eq!(Readiness::of("loading"), Readiness::Loading);
        assert_eq!(Readiness::of("interactive"), Readiness::Interactive);
        assert_eq!(Readiness::of("complete"), Readiness::Complete);
    }

    #[test]
    fn unknown_ready_state_waits_for_dom_content_loaded() {
        assert_eq!(Readiness::of(""), Readiness::Loading);
    }
}
