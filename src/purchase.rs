use std::rc::Rc;

use log::info;
use web_sys::{Event, Window};

use crate::config::PageConfig;

/// Shop links that have not been wired up yet carry no href or a bare `#`.
pub fn is_placeholder(href: Option<&str>) -> bool {
    matches!(href, None | Some("") | Some("#"))
}

pub struct PurchaseGuard {
    window: Window,
    config: Rc<PageConfig>,
}

impl PurchaseGuard {
    pub fn new(window: &Window, config: Rc<PageConfig>) -> Self {
        Self {
            window: window.clone(),
            config,
        }
    }

    pub fn on_click(&self, href: Option<&str>, event: &Event) {
        // Analytics hook goes here once a tracker is chosen.
        info!("Purchase button clicked");

        if is_placeholder(href) {
            event.prevent_default();
            let notice = &self.config.placeholder_notice;
            let _ = self.window.alert_with_message(notice);
        }
    }
}
