//! Interaction tracking
//!
//! Every event is logged locally, then forwarded to the page's `gtag` hook
//! and `dataLayer` queue when the host defines them. Only the most recent
//! [`HISTORY_LIMIT`] events are kept for inspection.

use std::collections::VecDeque;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::host::Host;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub name: String,
    pub data: Value,
}

/// Events retained by [`Analytics`]
pub const HISTORY_LIMIT: usize = 200;

#[derive(Debug)]
pub struct Analytics {
    events: VecDeque<TrackedEvent>,
    limit: usize,
}

impl Default for Analytics {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(limit.min(HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn track<H: Host + ?Sized>(&mut self, host: &mut H, name: &str, data: Value) {
        host.gtag(name, &data);
        info!(event = name, data = %data, "Event tracked");
        host.push_data_layer(data_layer_entry(name, &data));
        if self.limit == 0 {
            return;
        }
        if self.events.len() == self.limit {
            self.events.pop_front();
        }
        self.events.push_back(TrackedEvent {
            name: name.to_string(),
            data,
        });
    }

    /// Retained events, oldest first
    pub fn events(&self) -> impl Iterator<Item = &TrackedEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self, name: &str) -> Option<&TrackedEvent> {
        self.events.iter().rev().find(|e| e.name == name)
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name == name).count()
    }
}

/// `{event, ...data}`
fn data_layer_entry(name: &str, data: &Value) -> Value {
    let mut entry = Map::new();
    entry.insert("event".to_string(), Value::String(name.to_string()));
    if let Value::Object(fields) = data {
        for (key, value) in fields {
            entry.insert(key.clone(), value.clone());
        }
    }
    Value::Object(entry)
}
