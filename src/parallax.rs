use std::rc::Rc;

use log::debug;
use web_sys::{Document, Element, Window};

use crate::config::PageConfig;
use crate::dom;

/// CSS transform for the floating product at `scroll_y`, or `None` once the
/// hero has scrolled out, in which case the last transform stays in place.
pub fn transform(scroll_y: f64, hero_height: f64, config: &PageConfig) -> Option<String> {
    if scroll_y >= hero_height {
        return None;
    }
    let shift = scroll_y * config.parallax_shift;
    let angle = config.parallax_base_deg + scroll_y * config.parallax_deg_per_px;
    Some(format!("translateY({}px) rotate({}deg)", shift, angle))
}

pub struct Parallax {
    window: Window,
    config: Rc<PageConfig>,
    hero: Element,
    float: Element,
}

impl Parallax {
    pub fn bind(window: &Window, document: &Document, config: Rc<PageConfig>) -> Option<Self> {
        let hero = dom::query(document, &config.hero_selector);
        let float = dom::query(document, &config.float_selector);
        let (Some(hero), Some(float)) = (hero, float) else {
            debug!("Parallax inactive: hero or floating element missing");
            return None;
        };
        Some(Self {
            window: window.clone(),
            config,
            hero,
            float,
        })
    }

    pub fn on_scroll(&self) {
        let scroll_y = dom::scroll_y(&self.window);
        if let Some(value) = transform(scroll_y, dom::offset_height(&self.hero), &self.config) {
            dom::set_style(&self.float, "transform", &value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_page_keeps_base_tilt() {
        let config = PageConfig::default();
        assert_eq!(
            transform(0.0, 900.0, &config).as_deref(),
            Some("translateY(0px) rotate(-5deg)")
        );
    }

    #[test]
    fn shift_and_rotation_follow_scroll() {
        let config = PageConfig::default();
        assert_eq!(
            transform(100.0, 900.0, &config).as_deref(),
            Some("translateY(30px) rotate(-3deg)")
        );
        assert_eq!(
            transform(250.0, 900.0, &config).as_deref(),
            Some("translateY(75px) rotate(0deg)")
        );
    }

    #[test]
    fn no_update_past_hero_height() {
        let config = PageConfig::default();
        assert_eq!(transform(900.0, 900.0, &config), None);
        assert_eq!(transform(1500.0, 900.0, &config), None);
    }
}
