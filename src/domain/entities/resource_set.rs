//! Resource Set Entity
//!
//! Ordered list of resource addresses tracked in the shared state.

use serde::Serialize;

/// Resource addresses currently tracked in remote state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceSet(Vec<String>);

impl ResourceSet {
    pub fn new(ids: Vec<String>) -> Self {
        Self(ids)
    }

    /// Parse `terraform state list` output.
    ///
    /// Data sources are read-only lookups, not provisioned entities, so they
    /// never make a deployment count as existing.
    pub fn from_state_list(output: &str) -> Self {
        let ids = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !is_data_source(line))
            .map(str::to_string)
            .collect();
        Self(ids)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|r| r == id)
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn is_data_source(address: &str) -> bool {
    let mut segments = address.split('.');
    // Skip `module.<name>` pairs to reach the resource mode.
    loop {
        match segments.next() {
            Some("module") => {
                segments.next();
            }
            Some(segment) => return segment == "data",
            None => return false,
        }
    }
}
