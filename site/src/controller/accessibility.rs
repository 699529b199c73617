//! Keyboard handling, focusability, live announcements and the skip link

use std::time::Duration;

use tracing::debug;

use super::{SiteController, Task};
use crate::dom::{Dom, NodeId};
use crate::host::Host;

const FOCUSABLE: &str = "button, a, input, textarea, select, [tabindex]";
const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(1);

const SKIP_LINK_STYLE: [(&str, &str); 11] = [
    ("position", "absolute"),
    ("top", "-40px"),
    ("left", "6px"),
    ("background", "var(--ocean-blue-600)"),
    ("color", "white"),
    ("padding", "8px"),
    ("text-decoration", "none"),
    ("border-radius", "4px"),
    ("z-index", "1000"),
    ("opacity", "0"),
    ("transition", "opacity 0.3s, top 0.3s"),
];

impl<D: Dom, H: Host> SiteController<D, H> {
    pub(super) fn setup_accessibility(&mut self) {
        self.setup_focus_management();
        self.setup_live_region();
        self.setup_skip_link();
    }

    fn setup_focus_management(&mut self) {
        for element in self.dom.query_selector_all(FOCUSABLE) {
            let tag = self.dom.tag_name(element);
            let has_tabindex = self
                .dom
                .attribute(element, "tabindex")
                .is_some_and(|t| !t.is_empty());
            if !has_tabindex && tag != "input" && tag != "textarea" {
                self.dom.set_attribute(element, "tabindex", "0");
            }
        }
    }

    fn setup_live_region(&mut self) {
        let Some(body) = self.dom.body() else {
            return;
        };
        if self.dom.element_by_id("live-region").is_some() {
            return;
        }
        let region = self.append_element(body, "div", "sr-only", None);
        self.dom.set_attribute(region, "aria-live", "polite");
        self.dom.set_attribute(region, "aria-atomic", "true");
        self.dom.set_attribute(region, "id", "live-region");
    }

    fn setup_skip_link(&mut self) {
        let Some(body) = self.dom.body() else {
            return;
        };
        let link = self.dom.create_element("a");
        self.dom.set_attribute(link, "href", "#main-content");
        self.dom.set_attribute(link, "class", "skip-to-content");
        self.dom.set_text(link, "Skip to main content");
        for (property, value) in SKIP_LINK_STYLE {
            self.dom.set_style(link, property, value);
        }
        let first = self.dom.first_child(body);
        self.dom.insert_before(body, link, first);
        self.bindings.skip_link = Some(link);
    }

    pub(super) fn reveal_skip_link(&mut self, link: NodeId) {
        self.dom.set_style(link, "top", "6px");
        self.dom.set_style(link, "opacity", "1");
    }

    pub(super) fn hide_skip_link(&mut self, link: NodeId) {
        self.dom.set_style(link, "top", "-40px");
        self.dom.set_style(link, "opacity", "0");
    }

    /// Keydown on the document
    pub fn on_key(&mut self, key: &str) {
        match key {
            "Escape" => {
                if let Some(modal) = self.dom.query_selector(".modal:not(.hidden)") {
                    self.dom.add_class(modal, "hidden");
                    debug!(node = modal.0, "Modal closed");
                }
            }
            "Tab" => {
                if let Some(body) = self.dom.body() {
                    self.dom.add_class(body, "keyboard-navigation");
                }
            }
            _ => {}
        }
    }

    /// Screen-reader announcement, cleared after a second
    pub fn announce(&mut self, message: &str, now: Duration) {
        if let Some(region) = self.dom.element_by_id("live-region") {
            self.dom.set_text(region, message);
            self.timers.schedule(now + ANNOUNCEMENT_TTL, Task::ClearAnnouncement);
        }
    }
}
