//! Lock Diagnostic Parser
//!
//! Terraform reports lock contention only as free-form diagnostic text. This
//! module turns that text into a typed `LockInfo`, or says precisely why it
//! could not. It is the only place that knows the text format.
//!
//! The block looks like this (optionally ANSI-colored, optionally inside the
//! `│` gutter newer Terraform versions draw around diagnostics):
//!
//! ```text
//! Error: Error acquiring the state lock
//!
//! Error message: ConditionalCheckFailedException: The conditional request failed
//! Lock Info:
//!   ID:        e550de88-751a-3bda-ebf3-b9af189935af
//!   Path:      shipyard-tfstate/app/terraform.tfstate
//!   Operation: OperationTypeApply
//!   Who:       ci@runner-12
//!   Version:   1.7.5
//!   Created:   2024-05-01 10:00:00.123456789 +0000 UTC
//!   Info:
//!
//! Terraform acquires a state lock to protect the state from being written
//! ```

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::domain::entities::{LockInfo, LockOperation};
use crate::error::ShipyardError;

/// Marker Terraform prints when the lock is held elsewhere
pub const CONTENTION_MARKER: &str = "Error acquiring the state lock";
/// Start of the structured lock metadata block
pub const LOCK_INFO_ANCHOR: &str = "Lock Info:";

/// Interpret the output of a failed lock probe.
///
/// Contention yields the parsed lock (or `ParseFailure` with the raw text);
/// anything else is `BackendUnreachable` and must never be read as "no lock".
pub fn interpret_probe_failure(raw: &str) -> Result<LockInfo, ShipyardError> {
    let clean = strip_ansi(raw);
    if !is_lock_contention(&clean) {
        return Err(ShipyardError::BackendUnreachable {
            diagnostics: clean.trim().to_string(),
        });
    }
    parse_lock_info(&clean).ok_or_else(|| ShipyardError::ParseFailure {
        raw: clean.trim().to_string(),
    })
}

/// Whether the diagnostic text reports lock contention.
pub fn is_lock_contention(text: &str) -> bool {
    text.contains(CONTENTION_MARKER) || text.contains(LOCK_INFO_ANCHOR)
}

/// Scan from the `Lock Info:` anchor to the next blank line.
///
/// Returns `None` when the anchor is absent or the block carries no id.
pub fn parse_lock_info(text: &str) -> Option<LockInfo> {
    let text = strip_ansi(text);
    let mut lines = text.lines().map(strip_gutter);
    lines.by_ref().find(|l| l.trim_start().starts_with(LOCK_INFO_ANCHOR))?;

    let mut lock = LockInfo {
        id: String::new(),
        path: String::new(),
        operation: LockOperation::Other(String::new()),
        who: String::new(),
        created_at: None,
        created_raw: String::new(),
        version: String::new(),
    };

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "ID" => lock.id = value.to_string(),
            "Path" => lock.path = value.to_string(),
            "Operation" => lock.operation = LockOperation::parse(value),
            "Who" => lock.who = value.to_string(),
            "Version" => lock.version = value.to_string(),
            "Created" => {
                lock.created_raw = value.to_string();
                lock.created_at = parse_created(value);
            }
            _ => {}
        }
    }

    if lock.id.is_empty() {
        None
    } else {
        Some(lock)
    }
}

/// Remove ANSI escape sequences (CSI and OSC).
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('[') => {
                let _ = chars.next();
                // CSI: parameters and intermediates, then one final byte in @..~
                for next in chars.by_ref() {
                    if ('@'..='~').contains(&next) {
                        break;
                    }
                }
            }
            Some(']') => {
                let _ = chars.next();
                // OSC: terminated by BEL or ESC \
                while let Some(next) = chars.next() {
                    if next == '\u{7}' {
                        break;
                    }
                    if next == '\u{1b}' {
                        if chars.peek() == Some(&'\\') {
                            let _ = chars.next();
                        }
                        break;
                    }
                }
            }
            Some(_) => {
                // Two-byte escape
                let _ = chars.next();
            }
            None => {}
        }
    }

    Cow::Owned(out)
}

fn strip_gutter(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('│') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

/// Terraform prints Go's default time format: `2006-01-02 15:04:05.999999999 -0700 MST`.
fn parse_created(value: &str) -> Option<DateTime<Utc>> {
    let head: Vec<&str> = value.split_whitespace().take(3).collect();
    if head.len() < 3 {
        return None;
    }
    DateTime::parse_from_str(&head.join(" "), "%Y-%m-%d %H:%M:%S%.f %z")
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
