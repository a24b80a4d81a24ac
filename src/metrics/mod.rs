use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated across an editing session's lifetime.
#[derive(Debug, Default, Clone)]
pub struct EditMetrics {
    edits: u64,
    placements: u64,
    resolves: u64,
    commits: u64,
    blocked_commits: u64,
}

impl EditMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_edit(&mut self) {
        self.edits = self.edits.saturating_add(1);
    }

    pub fn record_placement(&mut self) {
        self.placements = self.placements.saturating_add(1);
    }

    pub fn record_resolve(&mut self) {
        self.resolves = self.resolves.saturating_add(1);
    }

    pub fn record_commit(&mut self, blocked: bool) {
        if blocked {
            self.blocked_commits = self.blocked_commits.saturating_add(1);
        } else {
            self.commits = self.commits.saturating_add(1);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            edits: self.edits,
            placements: self.placements,
            resolves: self.resolves,
            commits: self.commits,
            blocked_commits: self.blocked_commits,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub edits: u64,
    pub placements: u64,
    pub resolves: u64,
    pub commits: u64,
    pub blocked_commits: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("edits".to_string(), json!(self.edits));
        map.insert("placements".to_string(), json!(self.placements));
        map.insert("resolves".to_string(), json!(self.resolves));
        map.insert("commits".to_string(), json!(self.commits));
        map.insert(
            "blocked_commits".to_string(),
            json!(self.blocked_commits),
        );
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "edit_metrics", self.as_fields())
    }
}
