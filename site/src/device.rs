//! Device and browser classification

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Capability flags consulted by download and touch behaviors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub is_mobile: bool,
    #[serde(rename = "isIOS")]
    pub is_ios: bool,
    pub is_android: bool,
    pub is_safari: bool,
    pub is_chrome: bool,
    pub is_firefox: bool,
}

pub trait Capabilities {
    fn detect(&self) -> DeviceProfile;
}

/// User-agent string matching
#[derive(Debug, Clone)]
pub struct UserAgentCapabilities {
    user_agent: String,
}

impl UserAgentCapabilities {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

fn is_mobile(user_agent: &str) -> bool {
    static MOBILE: OnceLock<Option<Regex>> = OnceLock::new();
    MOBILE
        .get_or_init(|| Regex::new(r"(?i)Android|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(user_agent))
}

impl Capabilities for UserAgentCapabilities {
    fn detect(&self) -> DeviceProfile {
        let ua = self.user_agent.as_str();
        let is_chrome = ua.contains("Chrome");
        DeviceProfile {
            is_mobile: is_mobile(ua),
            is_ios: ["iPad", "iPhone", "iPod"].iter().any(|d| ua.contains(d)),
            is_android: ua.contains("Android"),
            is_safari: ua.contains("Safari") && !is_chrome,
            is_chrome,
            is_firefox: ua.contains("Firefox"),
        }
    }
}

/// Always reports the same profile
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCapabilities(pub DeviceProfile);

impl Capabilities for FixedCapabilities {
    fn detect(&self) -> DeviceProfile {
        self.0
    }
}
