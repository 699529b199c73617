//! App download buttons: store redirect on a matching phone, otherwise a
//! waitlist or QR code modal.

use serde_json::json;
use tracing::{debug, warn};

use super::SiteController;
use crate::dom::{Dom, NodeId};
use crate::host::Host;

pub const IOS_STORE_URL: &str = "https://apps.apple.com/app/waves-marine-navigation/id123456789";
pub const ANDROID_STORE_URL: &str = "https://play.google.com/store/apps/details?id=com.waves.marine";

const MODAL_CLASS: &str = "modal fixed inset-0 z-50 flex items-center justify-center p-4 bg-black bg-opacity-50";
const CLOSE_BUTTON_CLASS: &str = "text-gray-400 hover:text-gray-600";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Platform named by a button label
    pub fn from_label(label: &str) -> Option<Self> {
        if label.contains("iOS") || label.contains("Apple") {
            Some(Platform::Ios)
        } else if label.contains("Android") {
            Some(Platform::Android)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    pub fn store_url(&self) -> &'static str {
        match self {
            Platform::Ios => IOS_STORE_URL,
            Platform::Android => ANDROID_STORE_URL,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        }
    }

    fn device_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iPhone",
            Platform::Android => "Android device",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Platform::Ios => "apple",
            Platform::Android => "android",
        }
    }
}

impl<D: Dom, H: Host> SiteController<D, H> {
    pub(super) fn setup_download_buttons(&mut self) {
        let mut candidates = self.dom.query_selector_all(r##"a[href="#"]"##);
        for button in self.dom.query_selector_all("button") {
            if self.dom.text(button).contains("Download") && !candidates.contains(&button) {
                candidates.push(button);
            }
        }
        for candidate in candidates {
            if let Some(platform) = Platform::from_label(&self.dom.text(candidate)) {
                self.bindings.download_buttons.push((candidate, platform));
            }
        }
    }

    pub fn handle_download(&mut self, platform: Platform) {
        let device = self.state.device;
        if device.is_mobile {
            let native = match platform {
                Platform::Ios => device.is_ios,
                Platform::Android => device.is_android,
            };
            if native {
                self.host.navigate(platform.store_url());
            } else {
                self.show_download_modal(platform);
            }
        } else {
            self.show_qr_code_modal(platform);
        }

        let user_agent = serde_json::to_value(device).unwrap_or_else(|e| {
            warn!("Failed to serialize device profile: {}", e);
            json!({})
        });
        let page = self.state.page.as_str();
        self.track(
            "download_attempt",
            json!({ "platform": platform.as_str(), "userAgent": user_agent, "page": page }),
        );
    }

    fn open_modal(&mut self, panel_class: &str) -> Option<(NodeId, NodeId)> {
        let body = self.dom.body()?;
        let modal = self.append_element(body, "div", MODAL_CLASS, None);
        let panel = self.append_element(modal, "div", panel_class, None);
        debug!(node = modal.0, "Modal opened");
        Some((modal, panel))
    }

    fn close_button(&mut self, parent: NodeId, class: &str, label: &str) -> NodeId {
        let button = self.append_element(parent, "button", class, Some(label));
        self.dom.set_attribute(button, "data-modal-close", "");
        button
    }

    /// Waitlist prompt for a phone on the other platform
    fn show_download_modal(&mut self, platform: Platform) {
        let Some((_, panel)) = self.open_modal("bg-white rounded-lg max-w-md w-full p-6 marine-shadow") else {
            return;
        };
        let header = self.append_element(panel, "div", "flex justify-between items-center mb-4", None);
        let title = format!("Download Waves for {}", platform.as_str().to_uppercase());
        self.append_element(header, "h3", "text-xl font-bold marine-gradient-text", Some(&title));
        let close = self.close_button(header, CLOSE_BUTTON_CLASS, "");
        self.append_element(close, "i", "fas fa-times", None);

        let content = self.append_element(panel, "div", "text-center", None);
        let icon_row = self.append_element(content, "div", "mb-4", None);
        let icon_class = format!("fab fa-{} text-4xl text-ocean-blue-600", platform.icon());
        self.append_element(icon_row, "i", &icon_class, None);
        let message = format!(
            "The Waves app is coming soon to {}! Join our waitlist to be notified when it's available.",
            platform.display_name()
        );
        self.append_element(content, "p", "mb-6 text-gray-600", Some(&message));

        let actions = self.append_element(content, "div", "space-y-3", None);
        self.append_element(
            actions,
            "button",
            "w-full btn-marine-primary py-3 px-6 rounded-lg text-white font-medium",
            Some("Join Waitlist"),
        );
        self.close_button(actions, "w-full text-gray-500 hover:text-gray-700", "Maybe Later");
    }

    /// Desktop visitors scan a code with their phone
    fn show_qr_code_modal(&mut self, platform: Platform) {
        let Some((_, panel)) =
            self.open_modal("bg-white rounded-lg max-w-sm w-full p-6 marine-shadow text-center")
        else {
            return;
        };
        let header = self.append_element(panel, "div", "mb-4", None);
        self.append_element(
            header,
            "h3",
            "text-xl font-bold marine-gradient-text mb-2",
            Some("Scan to Download"),
        );
        let hint = format!("Scan with your {}", platform.device_name());
        self.append_element(header, "p", "text-gray-600 text-sm", Some(&hint));

        let frame = self.append_element(panel, "div", "bg-gray-100 p-4 rounded-lg mb-4", None);
        let code = self.append_element(
            frame,
            "div",
            "w-32 h-32 bg-gray-300 mx-auto rounded flex items-center justify-center",
            None,
        );
        self.append_element(code, "i", "fas fa-qrcode text-4xl text-gray-500", None);
        self.close_button(panel, "text-gray-500 hover:text-gray-700 text-sm", "Close");
    }

    pub(super) fn close_download_modal(&mut self, close_button: NodeId) {
        if let Some(modal) = self.dom.closest(close_button, ".modal") {
            self.dom.remove(modal);
        }
    }
}
