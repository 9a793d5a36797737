use std::rc::Rc;

use web_sys::{Document, Event, ScrollBehavior, ScrollToOptions, Window};

use crate::config::PageConfig;
use crate::dom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorAction<'a> {
    /// Let the browser follow the link.
    Follow,
    /// Cancel navigation and scroll to whatever `selector` resolves to.
    ScrollTo { selector: &'a str },
}

pub fn route(href: Option<&str>) -> AnchorAction<'_> {
    match href {
        Some(href) if href.starts_with('#') && href != "#" => {
            AnchorAction::ScrollTo { selector: href }
        }
        _ => AnchorAction::Follow,
    }
}

pub fn target_top(target_offset_top: f64, navbar_height: f64) -> f64 {
    target_offset_top - navbar_height
}

pub struct SmoothScroll {
    window: Window,
    document: Document,
    config: Rc<PageConfig>,
}

impl SmoothScroll {
    pub fn new(window: &Window, document: &Document, config: Rc<PageConfig>) -> Self {
        Self {
            window: window.clone(),
            document: document.clone(),
            config,
        }
    }

    pub fn on_anchor_click(&self, href: Option<&str>, event: &Event) {
        let AnchorAction::ScrollTo { selector } = route(href) else {
            return;
        };
        event.prevent_default();

        // Fragments that are not valid selectors resolve to nothing.
        let Some(target) = dom::query(&self.document, selector) else {
            return;
        };
        let navbar_height = dom::query(&self.document, &self.config.navbar_selector)
            .map(|nav| dom::offset_height(&nav))
            .unwrap_or(0.0);

        let options = ScrollToOptions::new();
        options.set_top(target_top(dom::offset_top(&target), navbar_height));
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_follows_default() {
        assert_eq!(route(Some("#")), AnchorAction::Follow);
    }

    #[test]
    fn fragment_scrolls_to_matching_selector() {
        let selector = "#contact";
        assert_eq!(route(Some(selector)), AnchorAction::ScrollTo { selector });
    }

    #[test]
    fn non_fragment_links_are_left_alone() {
        assert_eq!(route(None), AnchorAction::Follow);
        assert_eq!(route(Some("/shop#top")), AnchorAction::Follow);
    }

    #[test]
    fn target_is_shifted_up_by_navbar() {
        assert_eq!(target_top(2300.0, 80.0), 2220.0);
        assert_eq!(target_top(40.0, 80.0), -40.0);
    }
}
