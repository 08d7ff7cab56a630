// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a job inside one exported batch.
pub type JobId = i64;

/// Closed set of trigger kinds known to the legacy scheduler export.
///
/// Kind strings are matched case-insensitively; anything unrecognised is
/// normalised to [`TriggerKind::Unknown`] via [`TriggerKind::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerKind {
    Schedule,
    Manual,
    Api,
    FileWatch,
    Dependency,
    DatabaseCdc,
    Approval,
    Threshold,
    Event,
    Unknown,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 10] = [
        TriggerKind::Schedule,
        TriggerKind::Manual,
        TriggerKind::Api,
        TriggerKind::FileWatch,
        TriggerKind::Dependency,
        TriggerKind::DatabaseCdc,
        TriggerKind::Approval,
        TriggerKind::Threshold,
        TriggerKind::Event,
        TriggerKind::Unknown,
    ];

    /// Canonical upper-case name, as it appears in exports and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::Schedule => "SCHEDULE",
            TriggerKind::Manual => "MANUAL",
            TriggerKind::Api => "API",
            TriggerKind::FileWatch => "FILE_WATCH",
            TriggerKind::Dependency => "DEPENDENCY",
            TriggerKind::DatabaseCdc => "DATABASE_CDC",
            TriggerKind::Approval => "APPROVAL",
            TriggerKind::Threshold => "THRESHOLD",
            TriggerKind::Event => "EVENT",
            TriggerKind::Unknown => "UNKNOWN",
        }
    }

    /// Lenient parse used when decoding exports: never fails.
    pub fn normalize(s: &str) -> Self {
        s.parse().unwrap_or(TriggerKind::Unknown)
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        TriggerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown trigger type: {}", s.trim()))
    }
}
