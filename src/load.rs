use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::config::PageConfig;
use crate::dom;

/// Delay from the load event to each hero element's reveal, in source order.
pub fn reveal_schedule(count: usize, initial_ms: u32, stagger_ms: u32) -> Vec<u32> {
    (0..count as u32)
        .map(|i| initial_ms + i * stagger_ms)
        .collect()
}

pub fn finalize(document: &Document, body: &HtmlElement, config: Rc<PageConfig>) {
    dom::set_class(body, &config.loaded_class, true);

    let elements = dom::query_all(document, &config.hero_fade_in_selector);
    let schedule = reveal_schedule(
        elements.len(),
        config.reveal_delay_ms,
        config.reveal_stagger_ms,
    );
    spawn_local(async move {
        let mut elapsed = 0;
        for (element, at) in elements.iter().zip(schedule) {
            TimeoutFuture::new(at - elapsed).await;
            elapsed = at;
            dom::set_class(element, &config.visible_class, true);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_are_staggered_after_initial_delay() {
        assert_eq!(reveal_schedule(4, 100, 150), vec![100, 250, 400, 550]);
    }

    #[test]
    fn empty_hero_schedules_nothing() {
        assert!(reveal_schedule(0, 100, 150).is_empty());
    }
}
