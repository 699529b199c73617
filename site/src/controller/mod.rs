//! Page-lifetime behavior controller
//!
//! [`SiteController`] owns the document, the host and all UI state for one
//! page load. The embedding layer forwards browser events to the `on_*`
//! methods, passing the time since page start, and calls [`tick`] at
//! [`next_deadline`] to run timeouts and the resize debounce.
//!
//! Missing elements skip the behavior that needs them; nothing here fails.
//!
//! [`tick`]: SiteController::tick
//! [`next_deadline`]: SiteController::next_deadline

mod accessibility;
mod animation;
mod counters;
mod downloads;
mod forms;
mod load;
mod navigation;
mod scroll;

pub use downloads::{Platform, ANDROID_STORE_URL, IOS_STORE_URL};
pub use load::PREFETCH_RESOURCES;

use std::collections::HashSet;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::analytics::Analytics;
use crate::counter::CounterAnimation;
use crate::device::{Capabilities, DeviceProfile, UserAgentCapabilities};
use crate::dom::{Dom, NodeId};
use crate::error::SubmitError;
use crate::forms::{FormTransport, SimulatedTransport};
use crate::gestures::SwipeTracker;
use crate::host::{Host, IntersectionEntry, ObserverKind};
use crate::page::Page;
use crate::timing::{Debounce, Throttle, TimerQueue};

pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Transient state for the current page load
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub page: Page,
    pub scroll_position: f64,
    /// Cleared when the user prefers reduced motion
    pub animations_enabled: bool,
    pub device: DeviceProfile,
    pub active_section: Option<String>,
    /// A form submission is in flight
    pub is_loading: bool,
}

/// Deferred work drained by `tick`
#[derive(Debug)]
enum Task {
    ClearAnnouncement,
    SettleSubmission {
        form: NodeId,
        outcome: Result<(), SubmitError>,
    },
    RevertSubmitButton {
        button: NodeId,
    },
    RemoveNode {
        node: NodeId,
    },
}

/// Elements behaviors were attached to during initialization
#[derive(Debug, Default)]
struct Bindings {
    nav_toggle: Option<(NodeId, NodeId)>,
    anchor_links: Vec<NodeId>,
    download_buttons: Vec<(NodeId, Platform)>,
    forms: Vec<NodeId>,
    validated_fields: Vec<NodeId>,
    feature_cards: Vec<NodeId>,
    logos: Vec<NodeId>,
    parallax: Vec<NodeId>,
    navbar: Option<NodeId>,
    skip_link: Option<NodeId>,
    touch: bool,
}

pub struct SiteController<D: Dom, H: Host> {
    dom: D,
    host: H,
    capabilities: Box<dyn Capabilities>,
    transport: Box<dyn FormTransport>,
    state: UiState,
    analytics: Analytics,
    timers: TimerQueue<Task>,
    scroll_throttle: Throttle,
    resize_debounce: Debounce,
    bindings: Bindings,
    counters: Vec<(NodeId, CounterAnimation)>,
    counted: HashSet<NodeId>,
    revealed: HashSet<NodeId>,
    swipe: SwipeTracker,
    last_navbar_scroll: f64,
    started: bool,
    components_ready: bool,
    frame_pending: bool,
}

impl<D: Dom, H: Host> SiteController<D, H> {
    /// Controller with user-agent detection and the simulated form backend
    pub fn new(dom: D, host: H) -> Self {
        let capabilities = UserAgentCapabilities::new(host.user_agent());
        let state = UiState {
            page: Page::from_path(&host.pathname()),
            scroll_position: 0.0,
            animations_enabled: !host.prefers_reduced_motion(),
            device: capabilities.detect(),
            active_section: None,
            is_loading: false,
        };
        Self {
            dom,
            host,
            capabilities: Box::new(capabilities),
            transport: Box::new(SimulatedTransport::default()),
            state,
            analytics: Analytics::new(),
            timers: TimerQueue::new(),
            scroll_throttle: Throttle::new(SCROLL_THROTTLE),
            resize_debounce: Debounce::new(RESIZE_DEBOUNCE),
            bindings: Bindings::default(),
            counters: Vec::new(),
            counted: HashSet::new(),
            revealed: HashSet::new(),
            swipe: SwipeTracker::default(),
            last_navbar_scroll: 0.0,
            started: false,
            components_ready: false,
            frame_pending: false,
        }
    }

    pub fn with_capabilities(mut self, capabilities: impl Capabilities + 'static) -> Self {
        self.state.device = capabilities.detect();
        self.capabilities = Box::new(capabilities);
        self
    }

    pub fn with_transport(mut self, transport: impl FormTransport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Initialize state and attach behaviors
    ///
    /// Components that need the parsed document wait for
    /// [`on_dom_ready`](Self::on_dom_ready) unless the host reports it ready.
    pub fn start(&mut self, now: Duration) {
        if self.started {
            return;
        }
        self.started = true;
        self.state.page = Page::from_path(&self.host.pathname());
        self.state.animations_enabled = !self.host.prefers_reduced_motion();
        self.state.device = self.capabilities.detect();
        info!(page = %self.state.page, "Waves Marine Navigation app initialized");

        if self.host.document_ready() {
            self.initialize_components(now);
        }
        self.bindings.touch = self.state.device.is_mobile;
        self.setup_logo_hover();
        self.setup_reveal_observers();
    }

    pub fn on_dom_ready(&mut self, now: Duration) {
        if self.started && !self.components_ready {
            self.initialize_components(now);
        }
    }

    fn initialize_components(&mut self, _now: Duration) {
        self.components_ready = true;
        self.setup_navigation();
        self.setup_download_buttons();
        self.setup_scroll_effects();
        self.setup_form_validation();
        self.setup_accessibility();

        match self.state.page {
            Page::Index => {
                self.setup_hero_animations();
                self.setup_feature_cards();
            }
            Page::Features => {}
            Page::About => self.setup_stat_counters(),
        }
        debug!(page = %self.state.page, "Components initialized");
    }

    /// Earliest time `tick` has work to do
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.timers.next_deadline(), self.resize_debounce.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run the resize debounce and every timeout due at `now`
    pub fn tick(&mut self, now: Duration) {
        if self.resize_debounce.fire_due(now) {
            self.handle_resize();
        }
        while let Some((at, task)) = self.timers.pop_due(now) {
            self.run_task(task, at);
        }
    }

    fn run_task(&mut self, task: Task, at: Duration) {
        match task {
            Task::ClearAnnouncement => {
                if let Some(region) = self.dom.element_by_id("live-region") {
                    self.dom.set_text(region, "");
                }
            }
            Task::SettleSubmission { form, outcome } => self.settle_submission(form, outcome, at),
            Task::RevertSubmitButton { button } => self.revert_submit_button(button),
            Task::RemoveNode { node } => self.dom.remove(node),
        }
    }

    /// Dispatch a click; returns whether the default action was prevented
    ///
    /// Element handlers run from the target outwards, then the document
    /// level link handler.
    pub fn on_click(&mut self, target: NodeId, now: Duration) -> bool {
        let mut prevented = false;
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = self.dom.parent(node);
        }

        for node in path {
            if let Some((toggle, menu)) = self.bindings.nav_toggle {
                if toggle == node {
                    prevented = true;
                    self.toggle_mobile_menu(toggle, menu);
                }
            }
            if self.bindings.anchor_links.contains(&node) && self.handle_anchor_click(node) {
                prevented = true;
            }
            let download = self
                .bindings
                .download_buttons
                .iter()
                .find(|(button, _)| *button == node)
                .map(|&(_, platform)| platform);
            if let Some(platform) = download {
                prevented = true;
                self.handle_download(platform);
            }
            if self.bindings.feature_cards.contains(&node) {
                self.track_feature_interaction(node);
            }
            if self.dom.attribute(node, "data-modal-close").is_some() {
                self.close_download_modal(node);
            }
        }

        if let Some(link) = self.dom.closest(target, "a") {
            self.handle_navigation(link);
        }
        debug!(node = target.0, prevented, at = ?now, "Click handled");
        prevented
    }

    pub fn on_focus(&mut self, node: NodeId) {
        if self.bindings.skip_link == Some(node) {
            self.reveal_skip_link(node);
        }
    }

    pub fn on_blur(&mut self, node: NodeId) {
        if self.bindings.skip_link == Some(node) {
            self.hide_skip_link(node);
        }
        if self.bindings.validated_fields.contains(&node) {
            self.validate_field(node);
        }
    }

    /// Value edit on a form control
    pub fn on_input(&mut self, node: NodeId) {
        if self.bindings.validated_fields.contains(&node) {
            self.clear_field_error(node);
        }
    }

    pub fn on_mouse_enter(&mut self, node: NodeId) {
        if self.bindings.logos.contains(&node) {
            self.logo_hover(node, true);
        }
        if self.bindings.feature_cards.contains(&node) {
            self.feature_card_hover(node, true);
        }
    }

    pub fn on_mouse_leave(&mut self, node: NodeId) {
        if self.bindings.logos.contains(&node) {
            self.logo_hover(node, false);
        }
        if self.bindings.feature_cards.contains(&node) {
            self.feature_card_hover(node, false);
        }
    }

    pub fn on_intersection(&mut self, kind: ObserverKind, entries: &[IntersectionEntry], now: Duration) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            match kind {
                ObserverKind::Reveal => self.reveal(entry.target),
                ObserverKind::Counter => self.start_counter(entry.target, now),
                ObserverKind::LazyImage => self.load_lazy_image(entry.target),
            }
        }
    }

    /// Record an analytics event
    pub fn track(&mut self, name: &str, data: Value) {
        self.analytics.track(&mut self.host, name, data);
    }

    fn request_frame(&mut self) {
        if !self.frame_pending {
            self.frame_pending = true;
            self.host.request_animation_frame();
        }
    }

    /// Create an element with a class list and optional text under `parent`
    fn append_element(&mut self, parent: NodeId, tag: &str, class: &str, text: Option<&str>) -> NodeId {
        let node = self.dom.create_element(tag);
        if !class.is_empty() {
            self.dom.set_attribute(node, "class", class);
        }
        if let Some(text) = text {
            self.dom.set_text(node, text);
        }
        self.dom.append_child(parent, node);
        node
    }
}

/// Format a number for inline CSS, rounded to three decimals
fn css_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
