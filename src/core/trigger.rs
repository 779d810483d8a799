//! Requests to run an analysis cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSource {
    Command,
    Schedule,
    Http,
}

impl std::fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TriggerSource::Command => "command",
            TriggerSource::Schedule => "schedule",
            TriggerSource::Http => "http",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trigger {
    pub source: TriggerSource,
    pub received_at: DateTime<Utc>,
}

impl Trigger {
    pub fn now(source: TriggerSource) -> Self {
        Self {
            source,
            received_at: Utc::now(),
        }
    }
}
