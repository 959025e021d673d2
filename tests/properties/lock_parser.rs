//! Property tests for lock diagnostic parsing.

use proptest::prelude::*;

use shipyard::domain::services::{interpret_probe_failure, parse_lock_info, strip_ansi};
use shipyard::ShipyardError;

fn token() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9@._/-]{1,32}").unwrap()
}

fn lock_block(id: &str, who: &str) -> String {
    format!(
        "Error: Error acquiring the state lock\n\
         \n\
         Lock Info:\n  \
           ID:        {id}\n  \
           Path:      bucket/app/terraform.tfstate\n  \
           Operation: OperationTypeApply\n  \
           Who:       {who}\n  \
           Version:   1.7.5\n  \
           Created:   2024-05-01 10:00:00.123456789 +0000 UTC\n  \
           Info:\n\
         \n\
         Terraform acquires a state lock to protect the state from being written\n"
    )
}

fn colorize(text: &str) -> String {
    text.lines()
        .map(|l| format!("\u{1b}[31m\u{1b}[1m{}\u{1b}[0m", l))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary diagnostic text never panics.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,512}") {
        let _ = parse_lock_info(&s);
        let _ = interpret_probe_failure(&s);
    }

    /// PROPERTY: Stripping ANSI is idempotent.
    #[test]
    fn property_strip_ansi_idempotent(s in "(?s).{0,256}") {
        let once = strip_ansi(&s).into_owned();
        let twice = strip_ansi(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: Color codes do not change what is parsed.
    #[test]
    fn property_colored_block_parses_like_plain(id in token(), who in token()) {
        let plain = lock_block(&id, &who);
        let colored = colorize(&plain);

        let a = parse_lock_info(&plain);
        let b = parse_lock_info(&colored);
        prop_assert!(a.is_some());
        prop_assert_eq!(a.as_ref().map(|l| l.id.as_str()), Some(id.as_str()));
        prop_assert_eq!(a, b);
    }

    /// PROPERTY: A parsed lock always carries a non-empty id.
    #[test]
    fn property_parsed_id_never_empty(s in "(?s).{0,512}") {
        if let Some(lock) = parse_lock_info(&s) {
            prop_assert!(!lock.id.trim().is_empty());
        }
    }

    /// PROPERTY: Failures without contention markers are never read as a lock.
    #[test]
    fn property_non_contention_is_unreachable(s in "[A-Za-z0-9 .:\n]{0,256}") {
        prop_assume!(!s.contains("Lock Info:"));
        prop_assume!(!s.contains("Error acquiring the state lock"));
        let is_unreachable = matches!(
            interpret_probe_failure(&s),
            Err(ShipyardError::BackendUnreachable { .. })
        );
        prop_assert!(is_unreachable);
    }
}
