//! Site pages and their swipe order

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Index,
    Features,
    About,
}

impl Page {
    /// Swipe order, left to right
    pub const ORDER: [Page; 3] = [Page::Index, Page::Features, Page::About];

    /// Identify the page from the location path
    pub fn from_path(path: &str) -> Self {
        if path.contains("features") {
            Page::Features
        } else if path.contains("about") {
            Page::About
        } else {
            Page::Index
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::Features => "features",
            Page::About => "about",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.html", self.as_str())
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&p| p == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<Page> {
        Self::ORDER.get(self.position() + 1).copied()
    }

    pub fn previous(self) -> Option<Page> {
        self.position().checked_sub(1).map(|i| Self::ORDER[i])
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
