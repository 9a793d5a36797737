use std::rc::Rc;

use web_sys::{Document, Element, Window};

use crate::config::PageConfig;
use crate::dom;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

pub fn is_scrolled(scroll_y: f64, after_px: f64) -> bool {
    scroll_y > after_px
}

/// The section whose `[top - offset, top - offset + height)` range holds
/// `scroll_y`. Later sections win when ranges overlap.
pub fn current_section(sections: &[SectionBox], scroll_y: f64, offset: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.top - offset;
            scroll_y >= top && scroll_y < top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

pub fn links_to(href: Option<&str>, section_id: Option<&str>) -> bool {
    match (href.and_then(|h| h.strip_prefix('#')), section_id) {
        (Some(fragment), Some(id)) => fragment == id,
        _ => false,
    }
}

/// Scroll-driven navbar flag plus active-link highlighting.
pub struct Navbar {
    window: Window,
    config: Rc<PageConfig>,
    navbar: Option<Element>,
    sections: Vec<Element>,
    links: Vec<Element>,
}

impl Navbar {
    pub fn bind(window: &Window, document: &Document, config: Rc<PageConfig>) -> Self {
        Self {
            window: window.clone(),
            navbar: dom::query(document, &config.navbar_selector),
            sections: dom::query_all(document, &config.section_selector),
            links: dom::query_all(document, &config.nav_link_selector),
            config,
        }
    }

    pub fn on_scroll(&self) {
        let scroll_y = dom::scroll_y(&self.window);

        if let Some(navbar) = &self.navbar {
            dom::set_class(
                navbar,
                &self.config.scrolled_class,
                is_scrolled(scroll_y, self.config.scrolled_after_px),
            );
        }

        let boxes: Vec<SectionBox> = self
            .sections
            .iter()
            .map(|section| SectionBox {
                id: section.id(),
                top: dom::offset_top(section),
                height: dom::offset_height(section),
            })
            .collect();
        let current = current_section(&boxes, scroll_y, self.config.section_offset_px);

        for link in &self.links {
            let active = links_to(link.get_attribute("href").as_deref(), current);
            dom::set_class(link, &self.config.active_class, active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, height: f64) -> SectionBox {
        SectionBox {
            id: id.to_string(),
            top,
            height,
        }
    }

    fn sections() -> Vec<SectionBox> {
        vec![
            section("about", 600.0, 800.0),
            section("solution", 1400.0, 900.0),
            section("contact", 2300.0, 500.0),
        ]
    }

    fn active_links<'a>(hrefs: &[&'a str], current: Option<&str>) -> Vec<&'a str> {
        hrefs
            .iter()
            .copied()
            .filter(|h| links_to(Some(h), current))
            .collect()
    }

    #[test]
    fn navbar_flag_flips_after_threshold() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
    }

    #[test]
    fn section_range_is_shifted_by_offset() {
        let s = sections();
        assert_eq!(current_section(&s, 499.0, 100.0), None);
        assert_eq!(current_section(&s, 500.0, 100.0), Some("about"));
        assert_eq!(current_section(&s, 1299.0, 100.0), Some("about"));
        assert_eq!(current_section(&s, 1300.0, 100.0), Some("solution"));
        assert_eq!(current_section(&s, 2700.0, 100.0), None);
    }

    #[test]
    fn exactly_one_link_matches_current_section() {
        let hrefs = ["#about", "#solution", "#contact", "/shop"];
        let s = sections();
        let current = current_section(&s, 2250.0, 100.0);
        assert_eq!(active_links(&hrefs, current), vec!["#contact"]);
    }

    #[test]
    fn no_links_active_outside_every_section() {
        let hrefs = ["#about", "#solution", "#contact", "#"];
        let s = sections();
        let current = current_section(&s, 10_000.0, 100.0);
        assert!(active_links(&hrefs, current).is_empty());
    }

    #[test]
    fn overlapping_ranges_resolve_to_the_later_section() {
        let overlapping = vec![
            section("hero", 0.0, 1000.0),
            section("about", 600.0, 400.0),
        ];
        assert_eq!(current_section(&overlapping, 700.0, 100.0), Some("about"));
        assert_eq!(current_section(&overlapping, 400.0, 100.0), Some("hero"));
    }

    #[test]
    fn missing_href_never_matches() {
        assert!(!links_to(None, Some("about")));
        assert!(!links_to(Some("about"), Some("about")));
    }
}
