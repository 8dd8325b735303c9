//! Types shared between the status API client and the notifier.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Response key holding the homework list.
pub const HOMEWORKS_KEY: &str = "homeworks";
/// Response key holding the timestamp to use as the next `from_date`.
pub const CURRENT_DATE_KEY: &str = "current_date";
/// Homework entry key holding the homework name.
pub const HOMEWORK_NAME_KEY: &str = "homework_name";
/// Homework entry key holding the review status.
pub const STATUS_KEY: &str = "status";

/// Review outcome reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Human-readable text sent to the chat.
    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Approved => "The homework has been checked and approved by the reviewer.",
            Verdict::Reviewing => "The homework has been taken for code review.",
            Verdict::Rejected => "The homework has been checked and rejected by the reviewer.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVerdict(pub String);

impl FromStr for Verdict {
    type Err = UnknownVerdict;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(UnknownVerdict(other.to_string())),
        }
    }
}

/// One homework entry that passed item validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: Verdict,
}

/// A shape-checked API response. Entries are kept as raw JSON so that a
/// single malformed item can be rejected on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}
