use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

pub trait Clock {
    fn now_ms(&self) -> f64;
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        web_sys::js_sys::Date::now()
    }
}

/// Leading-edge, fixed-window gate. The first call opens a window of
/// `interval_ms`; calls inside the window are dropped, not queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            window_start: None,
        }
    }

    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.window_start {
            Some(start) if now_ms - start < self.interval_ms => false,
            _ => {
                self.window_start = Some(now_ms);
                true
            }
        }
    }
}

pub fn throttle<C, F>(clock: C, interval_ms: f64, mut f: F) -> impl FnMut()
where
    C: Clock,
    F: FnMut(),
{
    let mut gate = Throttle::new(interval_ms);
    move || {
        if gate.admit(clock.now_ms()) {
            f();
        }
    }
}

/// Delays `f` by `wait_ms`; every call replaces the pending timeout, so only
/// the last call of a burst fires.
#[allow(dead_code)]
pub fn debounce<F>(wait_ms: u32, f: F) -> impl FnMut()
where
    F: Fn() + 'static,
{
    let f = Rc::new(f);
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    move || {
        let f = f.clone();
        let timeout = Timeout::new(wait_ms, move || f());
        // Dropping the previous handle cancels it.
        pending.borrow_mut().replace(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, Default)]
    struct ManualClock(Rc<Cell<f64>>);

    impl Clock for ManualClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    #[test]
    fn gate_drops_calls_inside_window() {
        let mut gate = Throttle::new(100.0);
        let fired: Vec<f64> = [0.0, 10.0, 50.0, 150.0]
            .into_iter()
            .filter(|t| gate.admit(*t))
            .collect();
        assert_eq!(fired, vec![0.0, 150.0]);
    }

    #[test]
    fn window_reopens_exactly_at_interval() {
        let mut gate = Throttle::new(100.0);
        assert!(gate.admit(0.0));
        assert!(!gate.admit(99.9));
        assert!(gate.admit(100.0));
        assert!(!gate.admit(150.0));
        assert!(gate.admit(200.0));
    }

    #[test]
    fn wrapper_invokes_on_leading_edge_only() {
        let clock = ManualClock::default();
        let calls = Rc::new(Cell::new(0));
        let mut wrapped = {
            let calls = calls.clone();
            throttle(clock.clone(), 100.0, move || calls.set(calls.get() + 1))
        };

        for t in [0.0, 10.0, 50.0, 150.0] {
            clock.0.set(t);
            wrapped();
        }
        assert_eq!(calls.get(), 2);
    }
}
