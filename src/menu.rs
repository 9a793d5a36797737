use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node};

use crate::config::PageConfig;
use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

/// Where a document click landed, relative to the menu button and menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    Toggle,
    Link,
    Inside,
    Outside,
}

impl MenuState {
    pub fn on(self, click: MenuClick) -> MenuState {
        match (self, click) {
            (MenuState::Open, MenuClick::Toggle) => MenuState::Closed,
            (MenuState::Closed, MenuClick::Toggle) => MenuState::Open,
            (_, MenuClick::Link | MenuClick::Outside) => MenuState::Closed,
            (state, MenuClick::Inside) => state,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

pub struct MobileMenu {
    config: Rc<PageConfig>,
    button: Element,
    menu: Element,
    links: Vec<Element>,
    body: HtmlElement,
    state: Cell<MenuState>,
}

impl MobileMenu {
    /// `None` when the page has no menu button or no nav menu.
    pub fn bind(document: &Document, body: &HtmlElement, config: Rc<PageConfig>) -> Option<Self> {
        let button = dom::query(document, &config.menu_button_selector);
        let menu = dom::query(document, &config.nav_menu_selector);
        let (Some(button), Some(menu)) = (button, menu) else {
            debug!("Mobile menu inactive: button or menu missing");
            return None;
        };
        Some(Self {
            links: dom::query_all(document, &config.nav_link_selector),
            body: body.clone(),
            state: Cell::new(MenuState::Closed),
            button,
            menu,
            config,
        })
    }

    fn classify(&self, event: &Event) -> MenuClick {
        let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return MenuClick::Outside;
        };
        let button: &Node = self.button.as_ref();
        let menu: &Node = self.menu.as_ref();
        if button.contains(Some(&node)) {
            MenuClick::Toggle
        } else if self.links.iter().any(|link| holds(link, &node)) {
            MenuClick::Link
        } else if menu.contains(Some(&node)) {
            MenuClick::Inside
        } else {
            MenuClick::Outside
        }
    }

    pub fn on_click(&self, event: &Event) {
        let next = self.state.get().on(self.classify(event));
        self.state.set(next);
        self.apply(next);
    }

    fn apply(&self, state: MenuState) {
        let open = state.is_open();
        dom::set_class(&self.button, &self.config.active_class, open);
        dom::set_class(&self.menu, &self.config.active_class, open);
        dom::set_class(&self.body, &self.config.menu_open_body_class, open);
    }
}

fn holds(container: &Element, node: &Node) -> bool {
    AsRef::<Node>::as_ref(container).contains(Some(node))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let state = MenuState::Closed.on(MenuClick::Toggle);
        assert_eq!(state, MenuState::Open);
        assert_eq!(state.on(MenuClick::Toggle), MenuState::Closed);
    }

    #[test]
    fn link_click_closes_an_open_menu() {
        let open = MenuState::default().on(MenuClick::Toggle);
        let state = open.on(MenuClick::Link);
        assert_eq!(state, MenuState::Closed);
    }

    #[test]
    fn outside_click_closes_and_inside_click_keeps() {
        let open = MenuState::Closed.on(MenuClick::Toggle);
        assert_eq!(open.on(MenuClick::Inside), MenuState::Open);
        assert_eq!(open.on(MenuClick::Outside), MenuState::Closed);
        assert_eq!(MenuState::Closed.on(MenuClick::Outside), MenuState::Closed);
        assert_eq!(MenuState::Closed.on(MenuClick::Inside), MenuState::Closed);
    }
}
