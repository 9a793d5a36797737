use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use log::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::config::PageConfig;
use crate::dom;

#[derive(Debug, Clone, PartialEq)]
pub struct CounterTarget {
    pub prefix: String,
    pub value: f64,
    pub suffix: String,
}

impl CounterTarget {
    /// Splits displayed text around its first run of ASCII digits.
    pub fn parse(text: &str) -> Option<Self> {
        let start = text.find(|c: char| c.is_ascii_digit())?;
        let len = text[start..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len() - start);
        let digits = &text[start..start + len];
        Some(Self {
            prefix: text[..start].to_string(),
            value: digits.parse().ok()?,
            suffix: text[start + len..].to_string(),
        })
    }

    pub fn render(&self, current: f64) -> String {
        format!("{}{}{}", self.prefix, current.floor(), self.suffix)
    }

    pub fn run(&self, steps: u32) -> CounterRun {
        CounterRun {
            target: self.value,
            increment: self.value / steps.max(1) as f64,
            current: 0.0,
            done: false,
        }
    }
}

/// Per-tick values of one animation: a float accumulator clamped to the target.
#[derive(Debug, Clone)]
pub struct CounterRun {
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl Iterator for CounterRun {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target {
            self.current = self.target;
            self.done = true;
        }
        Some(self.current)
    }
}

/// Delay between ticks so that `steps` ticks span `duration_ms`.
pub fn step_interval_ms(duration_ms: u32, steps: u32) -> u32 {
    duration_ms / steps.max(1)
}

pub struct CounterAnimator {
    counters: Vec<(Element, CounterTarget)>,
    generation: Rc<Cell<u64>>,
    steps: u32,
    step_ms: u32,
}

impl CounterAnimator {
    /// Captures every counter's target from its text as it is at bind time.
    pub fn bind(document: &Document, config: &PageConfig) -> Self {
        let counters: Vec<_> = dom::query_all(document, &config.stat_number_selector)
            .into_iter()
            .filter_map(|el| {
                let target = CounterTarget::parse(&el.text_content().unwrap_or_default())?;
                Some((el, target))
            })
            .collect();
        if counters.is_empty() {
            debug!("No numeric stat counters on page");
        }
        let steps = config.counter_steps.max(1);
        Self {
            counters,
            generation: Rc::new(Cell::new(0)),
            steps,
            step_ms: step_interval_ms(config.counter_duration_ms, steps),
        }
    }

    /// Restarts every counter from zero, cancelling runs already in flight.
    pub fn start(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        for (element, target) in &self.counters {
            let element = element.clone();
            let target = target.clone();
            let current_generation = self.generation.clone();
            let steps = self.steps;
            let step_ms = self.step_ms;
            spawn_local(async move {
                for value in target.run(steps) {
                    TimeoutFuture::new(step_ms).await;
                    if current_generation.get() != generation {
                        return;
                    }
                    element.set_text_content(Some(&target.render(value)));
                }
            });
        }
    }
}
