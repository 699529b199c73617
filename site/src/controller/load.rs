//! Work deferred until the window `load` event

use std::time::Duration;

use tracing::{info, warn};

use super::SiteController;
use crate::dom::{Dom, NodeId};
use crate::host::{Host, ObserverKind};

pub const PREFETCH_RESOURCES: [&str; 3] = [
    "/features.html",
    "/about.html",
    "https://images.unsplash.com/photo-1559827260-dc66d52bef19?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
];

const SERVICE_WORKER_PATH: &str = "/sw.js";

impl<D: Dom, H: Host> SiteController<D, H> {
    pub fn on_load(&mut self, now: Duration) {
        if let Some(body) = self.dom.body() {
            self.dom.add_class(body, "loaded");
        }
        for image in self.dom.query_selector_all("img[data-src]") {
            self.host.observe(ObserverKind::LazyImage, image);
        }
        self.setup_service_worker();
        self.prefetch_resources();
        info!(at = ?now, "Page load complete");
    }

    pub(super) fn load_lazy_image(&mut self, image: NodeId) {
        if let Some(src) = self.dom.attribute(image, "data-src") {
            self.dom.set_attribute(image, "src", &src);
            self.dom.add_class(image, "fade-in");
        }
        self.host.unobserve(ObserverKind::LazyImage, image);
    }

    fn setup_service_worker(&mut self) {
        if !self.host.supports_service_worker() {
            return;
        }
        match self.host.register_service_worker(SERVICE_WORKER_PATH) {
            Ok(()) => info!("ServiceWorker registered: {}", SERVICE_WORKER_PATH),
            Err(e) => warn!("{}", e),
        }
    }

    fn prefetch_resources(&mut self) {
        let Some(head) = self.dom.head() else {
            return;
        };
        for resource in PREFETCH_RESOURCES {
            let link = self.dom.create_element("link");
            self.dom.set_attribute(link, "rel", "prefetch");
            self.dom.set_attribute(link, "href", resource);
            self.dom.append_child(head, link);
        }
    }
}
