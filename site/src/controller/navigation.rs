//! Menu toggle, in-page anchors, link handling and swipe navigation

use serde_json::json;
use tracing::debug;

use super::SiteController;
use crate::dom::{Dom, NodeId};
use crate::gestures::SwipeDirection;
use crate::host::{hostname_of, Host, ScrollBehavior};

/// Space left above an anchor target for the fixed navbar
pub const SCROLL_OFFSET: f64 = 80.0;
/// A section becomes active once its top passes this line
const ACTIVE_SECTION_LINE: f64 = 100.0;

impl<D: Dom, H: Host> SiteController<D, H> {
    pub(super) fn setup_navigation(&mut self) {
        let toggle = self.dom.query_selector("[data-collapse-toggle]");
        let menu = self.dom.element_by_id("navbar-sticky");
        if let (Some(toggle), Some(menu)) = (toggle, menu) {
            self.bindings.nav_toggle = Some((toggle, menu));
        }
        self.bindings.anchor_links = self.dom.query_selector_all(r##"a[href^="#"]"##);
        self.update_active_nav_item();
    }

    pub(super) fn toggle_mobile_menu(&mut self, toggle: NodeId, menu: NodeId) {
        let expanded = self.dom.attribute(toggle, "aria-expanded").as_deref() == Some("true");
        self.dom
            .set_attribute(toggle, "aria-expanded", if expanded { "false" } else { "true" });
        self.dom.toggle_class(menu, "hidden");
        if !expanded {
            self.dom.add_class(menu, "mobile-nav");
        }
        debug!(open = !expanded, "Mobile menu toggled");
    }

    /// Returns whether the link pointed at an existing element
    pub(super) fn handle_anchor_click(&mut self, link: NodeId) -> bool {
        let href = self.dom.attribute(link, "href").unwrap_or_default();
        let target_id = href.get(1..).unwrap_or_default();
        match self.dom.element_by_id(target_id) {
            Some(target) => {
                self.smooth_scroll_to(target);
                true
            }
            None => false,
        }
    }

    /// Scroll so `element` sits just below the navbar
    pub fn smooth_scroll_to(&mut self, element: NodeId) {
        self.smooth_scroll_to_offset(element, SCROLL_OFFSET);
    }

    pub fn smooth_scroll_to_offset(&mut self, element: NodeId, offset: f64) {
        let top = self.dom.bounding_top(element) + self.host.scroll_y() - offset;
        let behavior = if self.state.animations_enabled {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        self.host.scroll_to(top, behavior);
    }

    /// Document-level link handling: open off-site links in a new context
    /// and record the navigation.
    pub(super) fn handle_navigation(&mut self, link: NodeId) {
        let href = self.dom.attribute(link, "href").unwrap_or_default();
        let resolved = self.host.resolve_url(&href);
        let link_host = hostname_of(&resolved).unwrap_or_default();
        if link_host != self.host.hostname() {
            self.dom.set_attribute(link, "target", "_blank");
            self.dom.set_attribute(link, "rel", "noopener noreferrer");
        }

        let data = json!({
            "from": self.host.pathname(),
            "to": resolved,
            "text": self.dom.text(link).trim(),
        });
        self.track("navigation", data);
    }

    /// Highlight the nav link of the last section scrolled past
    pub(super) fn update_active_nav_item(&mut self) {
        let mut current = None;
        for section in self.dom.query_selector_all("section[id]") {
            if self.dom.bounding_top(section) <= ACTIVE_SECTION_LINE {
                current = self.dom.attribute(section, "id");
            }
        }

        for link in self.dom.query_selector_all(r##"nav a[href^="#"]"##) {
            self.dom.remove_class(link, "active");
            let href = self.dom.attribute(link, "href").unwrap_or_default();
            if current.as_deref().is_some_and(|id| href.get(1..) == Some(id)) {
                self.dom.add_class(link, "active");
            }
        }
        self.state.active_section = current;
    }

    pub fn on_touch_start(&mut self, x: f64, y: f64) {
        if self.bindings.touch {
            self.swipe.start(x, y);
        }
    }

    pub fn on_touch_end(&mut self, x: f64, y: f64) {
        if !self.bindings.touch {
            return;
        }
        if let Some(direction) = self.swipe.end(x, y) {
            self.handle_swipe(direction);
        }
    }

    fn handle_swipe(&mut self, direction: SwipeDirection) {
        let page = self.state.page;
        let target = match direction {
            SwipeDirection::Left => page.next(),
            SwipeDirection::Right => page.previous(),
        };
        if let Some(target) = target {
            debug!(from = %page, to = %target, "Swipe navigation");
            self.host.navigate(&target.file_name());
        }
    }
}
