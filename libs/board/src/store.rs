//! Master-list store.

/// Authoritative registry of all known names of one item kind, independent of
/// placement. The list is kept unique and ordinal-sorted at all times, so
/// `normalized_list` is a plain accessor rather than a pass over the data.
///
/// One store instance per kind replaces shared mutable lists: every operation
/// that touches a master list goes through `add_name` / `remove_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameStore {
    names: Vec<String>,
}

impl NameStore {
    /// Build a store from raw input, collapsing duplicates and sorting.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Add a name. Returns false if it was already present.
    pub fn add_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.names.binary_search(&name) {
            Ok(_) => false,
            Err(pos) => {
                self.names.insert(pos, name);
                true
            }
        }
    }

    /// Remove a name. Returns false if it was not present.
    pub fn remove_name(&mut self, name: &str) -> bool {
        match self.names.binary_search_by(|n| n.as_str().cmp(name)) {
            Ok(pos) => {
                self.names.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .is_ok()
    }

    /// The unique, ordinal-sorted list of known names.
    pub fn normalized_list(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_and_sort() {
        let store = NameStore::new(["Bob", "Alice", "Alice"].map(String::from));
        assert_eq!(store.normalized_list(), ["Alice", "Bob"]);
    }

    #[test]
    fn add_is_idempotent() {
        let mut store = NameStore::default();
        assert!(store.add_name("Carol"));
        assert!(!store.add_name("Carol"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_keeps_order() {
        let mut store = NameStore::new(["Bob".to_string()]);
        store.add_name("Alice");
        store.add_name("Zed");
        assert_eq!(store.normalized_list(), ["Alice", "Bob", "Zed"]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut store = NameStore::new(["Alice".to_string()]);
        assert!(!store.remove_name("Bob"));
        assert!(store.remove_name("Alice"));
        assert!(store.is_empty());
    }

    #[test]
    fn sort_is_case_sensitive_ordinal() {
        let store = NameStore::new(["alice", "Bob"].map(String::from));
        // Uppercase sorts before lowercase in ordinal order.
        assert_eq!(store.normalized_list(), ["Bob", "alice"]);
    }
}
