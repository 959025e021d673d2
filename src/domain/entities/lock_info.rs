//! Lock Info Entity
//!
//! Snapshot of a held state lock as reported by the backend. It reflects
//! external state and can be stale by the time anyone acts on it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Operation that acquired the lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockOperation {
    Plan,
    Apply,
    Destroy,
    /// Anything the backend reports that we do not model (e.g. `OperationTypeInvalid`)
    Other(String),
}

impl LockOperation {
    /// Parse Terraform's `OperationType*` names, with or without the prefix.
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim();
        let short = name.strip_prefix("OperationType").unwrap_or(name);
        match short.to_ascii_lowercase().as_str() {
            "plan" => Self::Plan,
            "apply" => Self::Apply,
            "destroy" => Self::Destroy,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl fmt::Display for LockOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Apply => write!(f, "apply"),
            Self::Destroy => write!(f, "destroy"),
            Self::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Metadata describing a held distributed lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockInfo {
    /// Opaque lock token, required for force-unlock
    pub id: String,
    pub path: String,
    pub operation: LockOperation,
    pub who: String,
    /// Parsed creation time, if the backend's format was recognized
    pub created_at: Option<DateTime<Utc>>,
    /// Creation time exactly as reported
    pub created_raw: String,
    pub version: String,
}

impl LockInfo {
    /// Human-readable age of the lock relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Option<String> {
        let created = self.created_at?;
        let secs = (now - created).num_seconds().max(0);
        Some(match secs {
            0..=59 => format!("{}s", secs),
            60..=3599 => format!("{}m", secs / 60),
            3600..=86_399 => format!("{}h{}m", secs / 3600, (secs % 3600) / 60),
            _ => format!("{}d", secs / 86_400),
        })
    }

    /// Rows for display, in the order the backend prints them.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        let created = match self.created_at {
            Some(ts) => ts.to_rfc3339(),
            None => self.created_raw.clone(),
        };
        vec![
            ("ID", self.id.clone()),
            ("Path", self.path.clone()),
            ("Operation", self.operation.to_string()),
            ("Who", self.who.clone()),
            ("Version", self.version.clone()),
            ("Created", created),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn operation_parses_terraform_names() {
        assert_eq!(LockOperation::parse("OperationTypeApply"), LockOperation::Apply);
        assert_eq!(LockOperation::parse("OperationTypePlan"), LockOperation::Plan);
        assert_eq!(LockOperation::parse("destroy"), LockOperation::Destroy);
        assert_eq!(
            LockOperation::parse("OperationTypeInvalid"),
            LockOperation::Other("OperationTypeInvalid".to_string())
        );
    }

    #[test]
    fn age_formats_hours_and_minutes() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let lock = LockInfo {
            id: "abc".into(),
            path: String::new(),
            operation: LockOperation::Apply,
            who: String::new(),
            created_at: Some(created),
            created_raw: String::new(),
            version: String::new(),
        };
        assert_eq!(lock.age(now).as_deref(), Some("2h30m"));
    }

    #[test]
    fn age_is_none_without_parsed_timestamp() {
        let lock = LockInfo {
            id: "abc".into(),
            path: String::new(),
            operation: LockOperation::Plan,
            who: String::new(),
            created_at: None,
            created_raw: "yesterday".into(),
            version: String::new(),
        };
        assert!(lock.age(Utc::now()).is_none());
        assert_eq!(lock.display_rows()[5].1, "yesterday");
    }
}
