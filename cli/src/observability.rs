//! # Deployment Observability
//!
//! Structured deployment events, written to stdout as JSON lines prefixed
//! with `WAVES_EVENT:` so a log shipper can pick them out of the human
//! output. Emission is opt-in (`--emit-events` / `WAVES_EMIT_EVENTS`).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// Event prefix for log collectors to identify structured events
const EVENT_PREFIX: &str = "WAVES_EVENT:";

/// Deployment event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum DeployEvent {
    DeployStarted(DeployStartedEvent),
    DeployCompleted(DeployCompletedEvent),
    DeployFailed(DeployFailedEvent),
}

/// Common fields for all events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Timestamp in RFC3339 format
    pub timestamp: String,
    /// Unique id shared by all events of one run
    pub deploy_id: String,
    pub environment: String,
    pub bucket: String,
    pub region: String,
    pub profile: String,
}

impl EventMetadata {
    pub fn new(
        environment: impl Into<String>,
        bucket: impl Into<String>,
        region: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            deploy_id: Uuid::new_v4().to_string(),
            environment: environment.into(),
            bucket: bucket.into(),
            region: region.into(),
            profile: profile.into(),
        }
    }

    fn stamped(&self) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployStartedEvent {
    #[serde(flatten)]
    pub metadata: EventMetadata,
    pub dry_run: bool,
    pub validate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployCompletedEvent {
    #[serde(flatten)]
    pub metadata: EventMetadata,
    pub duration_secs: f64,
    pub dry_run: bool,
    pub warnings: usize,
    pub steps: Vec<StepDuration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployFailedEvent {
    #[serde(flatten)]
    pub metadata: EventMetadata,
    pub duration_secs: f64,
    pub failed_step: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDuration {
    pub step: String,
    pub duration_secs: f64,
}

/// Render an event as a prefixed JSON line
pub fn render_event(event: &DeployEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(json) => Some(format!("{}{}", EVENT_PREFIX, json)),
        Err(e) => {
            tracing::error!("Failed to serialize event: {}", e);
            None
        }
    }
}

/// Tracks step timing for one deployment run and emits its events
pub struct DeployTracker {
    metadata: EventMetadata,
    enabled: bool,
    start: Instant,
    steps: Vec<StepDuration>,
    current_step: Option<(String, Instant)>,
}

impl DeployTracker {
    pub fn new(metadata: EventMetadata, enabled: bool) -> Self {
        Self {
            metadata,
            enabled,
            start: Instant::now(),
            steps: Vec::new(),
            current_step: None,
        }
    }

    /// Start a new step, finishing the previous one
    pub fn start_step(&mut self, name: &str) {
        self.finish_step();
        self.current_step = Some((name.to_string(), Instant::now()));
    }

    fn finish_step(&mut self) {
        if let Some((step, started)) = self.current_step.take() {
            self.steps.push(StepDuration {
                step,
                duration_secs: started.elapsed().as_secs_f64(),
            });
        }
    }

    /// Name of the step currently running
    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn steps(&self) -> &[StepDuration] {
        &self.steps
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    fn emit(&self, event: DeployEvent) {
        if !self.enabled {
            return;
        }
        if let Some(line) = render_event(&event) {
            println!("{}", line);
        }
    }

    pub fn emit_started(&self, dry_run: bool, validate: bool) {
        self.emit(DeployEvent::DeployStarted(DeployStartedEvent {
            metadata: self.metadata.stamped(),
            dry_run,
            validate,
        }));
    }

    pub fn emit_completed(&mut self, dry_run: bool, warnings: usize) {
        self.finish_step();
        self.emit(DeployEvent::DeployCompleted(DeployCompletedEvent {
            metadata: self.metadata.stamped(),
            duration_secs: self.start.elapsed().as_secs_f64(),
            dry_run,
            warnings,
            steps: self.steps.clone(),
        }));
    }

    pub fn emit_failed(&mut self, error: &str) {
        let failed_step = self.current_step().unwrap_or("setup").to_string();
        self.finish_step();
        self.emit(DeployEvent::DeployFailed(DeployFailedEvent {
            metadata: self.metadata.stamped(),
            duration_secs: self.start.elapsed().as_secs_f64(),
            failed_step,
            error: error.to_string(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let metadata = EventMetadata::new("staging", "waves-static-seawater", "us-east-1", "default");
        let event = DeployEvent::DeployStarted(DeployStartedEvent {
            metadata,
            dry_run: true,
            validate: false,
        });

        let line = render_event(&event).unwrap();
        assert!(line.starts_with("WAVES_EVENT:"));
        assert!(line.contains("\"event_type\":\"DeployStarted\""));
        assert!(line.contains("\"environment\":\"staging\""));
        assert!(line.contains("\"dry_run\":true"));
    }

    #[test]
    fn test_tracker_records_steps() {
        let metadata = EventMetadata::new("dev", "bucket", "us-east-1", "default");
        let mut tracker = DeployTracker::new(metadata, false);
        tracker.start_step("credentials");
        assert_eq!(tracker.current_step(), Some("credentials"));
        tracker.start_step("sync");
        assert_eq!(tracker.steps().len(), 1);
        assert_eq!(tracker.steps()[0].step, "credentials");
        tracker.emit_completed(false, 0);
        assert_eq!(tracker.steps().len(), 2);
        assert!(tracker.current_step().is_none());
    }

    #[test]
    fn test_deploy_ids_are_unique() {
        let a = EventMetadata::new("dev", "b", "r", "p");
        let b = EventMetadata::new("dev", "b", "r", "p");
        assert_ne!(a.deploy_id, b.deploy_id);
    }
}
