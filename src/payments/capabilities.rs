use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Capability taken by every gateway that can be used at checkout
pub const PRODUCTS: &str = "products";
/// Gateway can send money back for an order it was paid with
pub const REFUNDS: &str = "refunds";

/// Named features a gateway declares. Names are open-ended so gateway
/// implementations can add their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<String>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supports(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Returns false if the capability was already present.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Returns false if the capability was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_are_not_supported() {
        let caps: CapabilitySet = [PRODUCTS].into_iter().collect();
        assert!(caps.supports(PRODUCTS));
        assert!(!caps.supports("made-up-feature"));
    }

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut caps = CapabilitySet::new();
        assert!(caps.add(REFUNDS));
        assert!(!caps.add(REFUNDS));
        assert_eq!(caps.len(), 1);

        assert!(caps.remove(REFUNDS));
        assert!(!caps.remove(REFUNDS));
        assert!(caps.is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let caps: CapabilitySet = ["products", "refunds", "products"].into_iter().collect();
        assert_eq!(caps.iter().collect::<Vec<_>>(), vec!["products", "refunds"]);
    }
}
