//! Scroll and resize reactions

use std::time::Duration;

use super::{css_number, SiteController};
use crate::dom::{Dom, NodeId};
use crate::host::Host;

const NAVBAR_SCROLLED_AT: f64 = 100.0;
const NAVBAR_HIDE_AT: f64 = 200.0;
const PARALLAX_INTENSITY: f64 = 0.3;
/// Viewport width where the desktop menu layout starts
const DESKTOP_WIDTH: f64 = 768.0;

impl<D: Dom, H: Host> SiteController<D, H> {
    pub(super) fn setup_scroll_effects(&mut self) {
        if !self.state.animations_enabled {
            return;
        }
        self.bindings.parallax = self.dom.query_selector_all(".hero-gradient, .parallax-bg");
        self.bindings.navbar = self.dom.query_selector("nav");
    }

    /// Navbar and parallax follow every scroll event; section tracking and
    /// reading progress are throttled.
    pub fn on_scroll(&mut self, now: Duration) {
        if let Some(navbar) = self.bindings.navbar {
            self.update_navbar(navbar);
        }
        self.update_parallax();
        if self.scroll_throttle.ready(now) {
            self.state.scroll_position = self.host.scroll_y();
            self.update_active_nav_item();
            self.update_reading_progress();
        }
    }

    fn update_navbar(&mut self, navbar: NodeId) {
        let y = self.host.scroll_y();
        if y > NAVBAR_SCROLLED_AT {
            self.dom.add_class(navbar, "scrolled");
            let transform = if y > self.last_navbar_scroll && y > NAVBAR_HIDE_AT {
                "translateY(-100%)"
            } else {
                "translateY(0)"
            };
            self.dom.set_style(navbar, "transform", transform);
        } else {
            self.dom.remove_class(navbar, "scrolled");
            self.dom.set_style(navbar, "transform", "translateY(0)");
        }
        self.last_navbar_scroll = y;
    }

    fn update_parallax(&mut self) {
        let y = self.host.scroll_y();
        for element in self.bindings.parallax.clone() {
            if y <= self.dom.offset_height(element) {
                let transform = format!("translateY({}px)", css_number(-PARALLAX_INTENSITY * y));
                self.dom.set_style(element, "transform", &transform);
            }
        }
    }

    fn update_reading_progress(&mut self) {
        let Some(bar) = self.dom.query_selector(".reading-progress") else {
            return;
        };
        let scrollable = self.host.scroll_height() - self.host.inner_height();
        let progress = if scrollable > 0.0 {
            (self.host.scroll_y() / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.dom.set_style(bar, "width", &format!("{:.2}%", progress));
    }

    pub fn on_resize(&mut self, now: Duration) {
        self.resize_debounce.call(now);
    }

    pub(super) fn handle_resize(&mut self) {
        self.state.device = self.capabilities.detect();
        if self.host.inner_width() >= DESKTOP_WIDTH {
            if let Some(menu) = self.dom.element_by_id("navbar-sticky") {
                self.dom.remove_class(menu, "hidden");
                self.dom.remove_class(menu, "mobile-nav");
            }
        }
    }
}
