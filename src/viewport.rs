use web_sys::{Element, Window};

use crate::dom;

/// Vertical extent of an element relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

/// True when `span` reaches into the viewport after trimming `threshold` of
/// its height off both the top and the bottom edge.
pub fn span_in_viewport(span: Span, viewport_height: f64, threshold: f64) -> bool {
    let offset = viewport_height * threshold;
    span.top <= viewport_height - offset && span.bottom >= offset
}

pub fn is_in_viewport(window: &Window, element: &Element, threshold: f64) -> bool {
    let rect = element.get_bounding_client_rect();
    let span = Span {
        top: rect.top(),
        bottom: rect.bottom(),
    };
    span_in_viewport(span, dom::viewport_height(window), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 800.0;

    fn span(top: f64, bottom: f64) -> Span {
        Span { top, bottom }
    }

    #[test]
    fn fully_inside_is_visible_at_zero_threshold() {
        assert!(span_in_viewport(span(100.0, 300.0), VH, 0.0));
    }

    #[test]
    fn above_or_below_is_hidden_at_zero_threshold() {
        assert!(!span_in_viewport(span(-400.0, -10.0), VH, 0.0));
        assert!(!span_in_viewport(span(820.0, 1200.0), VH, 0.0));
    }

    #[test]
    fn threshold_trims_both_edges() {
        // 20% of 800 is 160: the top must sit at or above 640 and the bottom at or past 160.
        assert!(span_in_viewport(span(640.0, 900.0), VH, 0.2));
        assert!(!span_in_viewport(span(700.0, 900.0), VH, 0.2));
        assert!(span_in_viewport(span(-200.0, 160.0), VH, 0.2));
        assert!(!span_in_viewport(span(-200.0, 100.0), VH, 0.2));
    }

    #[test]
    fn edges_touching_count_as_visible() {
        assert!(span_in_viewport(span(800.0, 900.0), VH, 0.0));
        assert!(span_in_viewport(span(-100.0, 0.0), VH, 0.0));
    }
}
