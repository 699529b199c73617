//! Stat counters on the about page

use std::time::Duration;

use tracing::debug;

use super::SiteController;
use crate::counter::{CounterAnimation, CounterFormat};
use crate::dom::{Dom, NodeId};
use crate::host::{Host, ObserverKind};

impl<D: Dom, H: Host> SiteController<D, H> {
    pub(super) fn setup_stat_counters(&mut self) {
        for stat in self.dom.query_selector_all(".stat-number") {
            self.host.observe(ObserverKind::Counter, stat);
        }
    }

    /// Begin counting up; each element counts once
    pub(super) fn start_counter(&mut self, element: NodeId, now: Duration) {
        if !self.counted.insert(element) {
            return;
        }
        self.host.unobserve(ObserverKind::Counter, element);
        let Some(format) = CounterFormat::parse(&self.dom.text(element)) else {
            debug!(node = element.0, "Counter text has no number");
            return;
        };
        self.dom.set_text(element, &format.frame(0.0));
        self.counters.push((element, CounterAnimation::new(format, now)));
        self.request_frame();
    }

    /// Advance every running counter to `now`
    pub fn on_animation_frame(&mut self, now: Duration) {
        self.frame_pending = false;
        let mut running = Vec::with_capacity(self.counters.len());
        for (element, animation) in std::mem::take(&mut self.counters) {
            let (text, done) = animation.frame(now);
            self.dom.set_text(element, &text);
            if !done {
                running.push((element, animation));
            }
        }
        self.counters = running;
        if !self.counters.is_empty() {
            self.request_frame();
        }
    }

    pub fn counters_running(&self) -> usize {
        self.counters.len()
    }
}
