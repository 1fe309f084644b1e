//! Staff annotation log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    Followup,
    Reminder,
    Issue,
    Resolved,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followup => "followup",
            Self::Reminder => "reminder",
            Self::Issue => "issue",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "followup" => Some(Self::Followup),
            "reminder" => Some(Self::Reminder),
            "issue" => Some(Self::Issue),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only free-text note attached to a battery. Created directly by
/// staff, or as a side effect of a warranty reopen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffNote {
    pub id: i32,
    pub battery_id: i32,
    pub note: String,
    pub note_type: NoteType,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub is_resolved: bool,
}
