//! Property tests for `terraform state list` parsing.

use proptest::prelude::*;

use shipyard::domain::entities::ResourceSet;

fn address() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_]{1,12}\\.[a-z_]{1,12}")
        .unwrap()
        .prop_filter("managed resources only", |a| {
            !a.starts_with("data.") && !a.starts_with("module.")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Data sources never count as tracked resources.
    #[test]
    fn property_data_sources_excluded(
        managed in proptest::collection::vec(address(), 0..8),
        data in proptest::collection::vec(address(), 0..8),
    ) {
        let mut lines: Vec<String> = managed.clone();
        lines.extend(data.iter().map(|d| format!("data.{}", d)));
        let set = ResourceSet::from_state_list(&lines.join("\n"));

        prop_assert_eq!(set.len(), managed.len());
        prop_assert!(set.iter().all(|r| !r.starts_with("data.")));
    }

    /// PROPERTY: Blank lines and surrounding whitespace are ignored.
    #[test]
    fn property_whitespace_ignored(managed in proptest::collection::vec(address(), 1..8)) {
        let padded = managed
            .iter()
            .map(|m| format!("  {}  \n\n", m))
            .collect::<String>();
        let set = ResourceSet::from_state_list(&padded);
        prop_assert_eq!(set, ResourceSet::new(managed));
    }
}
