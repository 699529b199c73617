//! Entrance reveals, hero stagger and hover effects

use serde_json::json;

use super::{css_number, SiteController};
use crate::dom::{Dom, NodeId};
use crate::host::{Host, ObserverKind};

const REVEAL_SELECTOR: &str = ".feature-card, .testimonial-card, .stat-number, h2, h3";
const FEATURE_STAGGER: f64 = 0.1;
const HERO_STAGGER: f64 = 0.2;

impl<D: Dom, H: Host> SiteController<D, H> {
    /// Hide animated elements and watch for them entering the viewport
    pub(super) fn setup_reveal_observers(&mut self) {
        if !self.state.animations_enabled {
            return;
        }
        for element in self.dom.query_selector_all(REVEAL_SELECTOR) {
            self.dom.set_style(element, "opacity", "0");
            self.dom.set_style(element, "transform", "translateY(30px)");
            self.host.observe(ObserverKind::Reveal, element);
        }
    }

    /// One-shot entrance transition
    pub(super) fn reveal(&mut self, element: NodeId) {
        if !self.revealed.insert(element) {
            return;
        }
        self.host.unobserve(ObserverKind::Reveal, element);

        if !self.state.animations_enabled {
            self.dom.set_style(element, "opacity", "1");
            self.dom.set_style(element, "transform", "none");
            return;
        }
        self.dom
            .set_style(element, "transition", "opacity 0.8s ease, transform 0.8s ease");
        self.dom.set_style(element, "opacity", "1");
        self.dom.set_style(element, "transform", "translateY(0)");

        if self.dom.has_class(element, "feature-card") {
            let index = self.dom.sibling_index(element).unwrap_or(0);
            let delay = format!("{}s", css_number(index as f64 * FEATURE_STAGGER));
            self.dom.set_style(element, "transition-delay", &delay);
        }
    }

    pub(super) fn setup_hero_animations(&mut self) {
        if !self.state.animations_enabled {
            return;
        }
        let Some(hero) = self.dom.query_selector(".hero-gradient") else {
            return;
        };
        let buttons = self.dom.query_all_within(hero, r#"a[class*="btn"], button"#);
        for (index, button) in buttons.into_iter().enumerate() {
            let delay = format!("{}s", css_number(index as f64 * HERO_STAGGER));
            self.dom.set_style(button, "animation-delay", &delay);
            self.dom.add_class(button, "animate-fade-in-up");
        }
    }

    pub(super) fn setup_feature_cards(&mut self) {
        self.bindings.feature_cards = self.dom.query_selector_all(".feature-card");
    }

    pub(super) fn feature_card_hover(&mut self, card: NodeId, entering: bool) {
        let Some(icon) = self.dom.query_within(card, ".icon-wrapper") else {
            return;
        };
        if !entering {
            self.dom.set_style(icon, "animation", "");
        } else if self.state.animations_enabled {
            self.dom
                .set_style(icon, "animation", "depth-pulse 1s ease-in-out infinite");
        }
    }

    pub(super) fn track_feature_interaction(&mut self, card: NodeId) {
        let feature = self
            .dom
            .query_within(card, "h3")
            .map(|title| self.dom.text(title))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        let page = self.state.page.as_str();
        self.track("feature_interaction", json!({ "feature": feature, "page": page }));
    }

    pub(super) fn setup_logo_hover(&mut self) {
        if self.state.animations_enabled {
            self.bindings.logos = self.dom.query_selector_all(".marine-logo");
        }
    }

    pub(super) fn logo_hover(&mut self, logo: NodeId, entering: bool) {
        if entering {
            if self.state.animations_enabled {
                self.dom.set_style(logo, "animation-duration", "0.5s");
                self.dom.set_style(logo, "animation-iteration-count", "3");
            }
        } else {
            self.dom.set_style(logo, "animation-duration", "3s");
            self.dom.set_style(logo, "animation-iteration-count", "infinite");
        }
    }
}
