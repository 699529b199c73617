//! Window-level services the page controller depends on
//!
//! Everything outside the document tree (location, viewport, scrolling,
//! visibility observers, animation frames, analytics globals, service
//! workers) is reached through [`Host`]. [`RecordingHost`] is a headless
//! implementation that records every call.

use serde_json::Value;

use crate::dom::NodeId;
use crate::error::SiteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Visibility observers registered by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    /// Entrance animation for cards, stats and headings
    Reveal,
    /// Stat counters on the about page
    Counter,
    /// `img[data-src]` lazy loading
    LazyImage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl ObserverKind {
    pub fn options(self) -> ObserverOptions {
        match self {
            ObserverKind::Reveal => ObserverOptions {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px",
            },
            ObserverKind::Counter => ObserverOptions {
                threshold: 0.5,
                root_margin: "0px",
            },
            ObserverKind::LazyImage => ObserverOptions {
                threshold: 0.0,
                root_margin: "0px",
            },
        }
    }
}

/// Single observer notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entering(target: NodeId) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }
}

pub trait Host {
    /// Page origin, e.g. `https://waves.seawater.io`
    fn origin(&self) -> String;
    fn pathname(&self) -> String;
    fn user_agent(&self) -> String;
    fn prefers_reduced_motion(&self) -> bool;
    /// Whether the document finished parsing when the controller starts
    fn document_ready(&self) -> bool;

    fn scroll_y(&self) -> f64;
    fn inner_width(&self) -> f64;
    fn inner_height(&self) -> f64;
    /// Full document height (`documentElement.scrollHeight`)
    fn scroll_height(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    fn navigate(&mut self, href: &str);

    fn observe(&mut self, kind: ObserverKind, node: NodeId);
    fn unobserve(&mut self, kind: ObserverKind, node: NodeId);
    fn request_animation_frame(&mut self);

    /// Call the global `gtag('event', ...)` hook; `false` when undefined
    fn gtag(&mut self, event: &str, data: &Value) -> bool;
    /// Push onto `window.dataLayer`; `false` when undefined
    fn push_data_layer(&mut self, entry: Value) -> bool;

    fn supports_service_worker(&self) -> bool;
    fn register_service_worker(&mut self, path: &str) -> Result<(), SiteError>;

    fn hostname(&self) -> String {
        hostname_of(&self.origin()).unwrap_or_default()
    }

    /// Resolve an `href` attribute against the current location
    fn resolve_url(&self, href: &str) -> String {
        if has_scheme(href) {
            return href.to_string();
        }
        let origin = self.origin();
        if let Some(rest) = href.strip_prefix("//") {
            let scheme = origin.split("://").next().unwrap_or("https");
            return format!("{}://{}", scheme, rest);
        }
        if href.starts_with('/') {
            return format!("{}{}", origin, href);
        }
        let path = self.pathname();
        if href.starts_with('#') || href.is_empty() {
            return format!("{}{}{}", origin, path, href);
        }
        let dir = match path.rfind('/') {
            Some(i) => &path[..=i],
            None => "/",
        };
        format!("{}{}{}", origin, dir, href)
    }
}

fn has_scheme(href: &str) -> bool {
    match href.find(':') {
        Some(i) if i > 0 => href[..i]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

/// Host part of an absolute URL, without port or credentials
///
/// Non-hierarchical URLs (`mailto:`, `tel:`) have an empty hostname.
pub fn hostname_of(url: &str) -> Option<String> {
    if !has_scheme(url) {
        return None;
    }
    let Some((_, rest)) = url.split_once("://") else {
        return Some(String::new());
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    Some(host.to_ascii_lowercase())
}

/// Headless [`Host`] that records every side effect
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub origin: String,
    pub pathname: String,
    pub user_agent: String,
    pub reduced_motion: bool,
    pub ready: bool,
    pub scroll_y: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub scroll_height: f64,
    pub has_gtag: bool,
    pub has_data_layer: bool,
    pub service_worker: bool,
    pub worker_error: Option<String>,

    pub scrolls: Vec<(f64, ScrollBehavior)>,
    pub navigations: Vec<String>,
    pub observed: Vec<(ObserverKind, NodeId)>,
    pub frame_requests: usize,
    pub gtag_calls: Vec<(String, Value)>,
    pub data_layer: Vec<Value>,
    pub registered_workers: Vec<String>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new("/index.html")
    }
}

impl RecordingHost {
    /// Desktop host at `pathname` with a short, non-scrollable viewport
    pub fn new(pathname: &str) -> Self {
        Self {
            origin: "https://waves.seawater.io".to_string(),
            pathname: pathname.to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0".to_string(),
            reduced_motion: false,
            ready: true,
            scroll_y: 0.0,
            inner_width: 1280.0,
            inner_height: 800.0,
            scroll_height: 800.0,
            has_gtag: false,
            has_data_layer: false,
            service_worker: false,
            worker_error: None,
            scrolls: Vec::new(),
            navigations: Vec::new(),
            observed: Vec::new(),
            frame_requests: 0,
            gtag_calls: Vec::new(),
            data_layer: Vec::new(),
            registered_workers: Vec::new(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn is_observing(&self, kind: ObserverKind, node: NodeId) -> bool {
        self.observed.contains(&(kind, node))
    }
}

impl Host for RecordingHost {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn document_ready(&self) -> bool {
        self.ready
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_width(&self) -> f64 {
        self.inner_width
    }

    fn inner_height(&self) -> f64 {
        self.inner_height
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.push((top, behavior));
        self.scroll_y = top.max(0.0);
    }

    fn navigate(&mut self, href: &str) {
        self.navigations.push(href.to_string());
    }

    fn observe(&mut self, kind: ObserverKind, node: NodeId) {
        if !self.is_observing(kind, node) {
            self.observed.push((kind, node));
        }
    }

    fn unobserve(&mut self, kind: ObserverKind, node: NodeId) {
        self.observed.retain(|&entry| entry != (kind, node));
    }

    fn request_animation_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn gtag(&mut self, event: &str, data: &Value) -> bool {
        if self.has_gtag {
            self.gtag_calls.push((event.to_string(), data.clone()));
        }
        self.has_gtag
    }

    fn push_data_layer(&mut self, entry: Value) -> bool {
        if self.has_data_layer {
            self.data_layer.push(entry);
        }
        self.has_data_layer
    }

    fn supports_service_worker(&self) -> bool {
        self.service_worker
    }

    fn register_service_worker(&mut self, path: &str) -> Result<(), SiteError> {
        if let Some(message) = &self.worker_error {
            return Err(SiteError::WorkerRegistration {
                path: path.to_string(),
                message: message.clone(),
            });
        }
        self.registered_workers.push(path.to_string());
        Ok(())
    }
}
