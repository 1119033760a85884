//! Insertion-ordered collections of named items.
//!
//! Documents routinely contain several layers, objects or terrains with the
//! same name. A `NamedCollection` keeps every one of them, in document
//! order, and gives each a unique lookup key:
//!
//! - the first item named `layer` is keyed `layer`
//! - the next ones are keyed `layer0`, `layer1`, ... (one counter per name)
//! - if a derived key is already taken, underscores are inserted before the
//!   counter (`layer_0`, `layer__0`, ...) until the key is free
//!
//! The derived key is only used for lookup; the item's own name is never
//! changed.

use std::collections::HashMap;

/// Anything stored in a [`NamedCollection`].
pub trait Named {
    fn name(&self) -> &str;
}

/// An ordered container of named items with deterministic duplicate-name
/// keys.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCollection<T> {
    items: Vec<T>,
    keys: Vec<String>,
    index: HashMap<String, usize>,
    collisions: HashMap<String, usize>,
}

impl<T> Default for NamedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            keys: Vec::new(),
            index: HashMap::new(),
            collisions: HashMap::new(),
        }
    }
}

impl<T: Named> NamedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, returning the key it can be looked up by.
    pub fn add(&mut self, item: T) -> &str {
        let key = self.unique_key(item.name());
        let position = self.items.len();

        self.index.insert(key.clone(), position);
        self.keys.push(key);
        self.items.push(item);

        &self.keys[position]
    }

    fn unique_key(&mut self, name: &str) -> String {
        if !self.index.contains_key(name) {
            return name.to_string();
        }

        let counter = self.collisions.entry(name.to_string()).or_insert(0);
        let count = *counter;
        *counter += 1;

        // Terminates: each retry produces a longer, previously unseen candidate.
        let mut separators = String::new();
        loop {
            let candidate = format!("{name}{separators}{count}");
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
            separators.push('_');
        }
    }
}

impl<T> NamedCollection<T> {
    /// Look up an item by its key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    /// Check whether a key is in use.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Get an item by insertion position.
    pub fn get_index(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// The lookup key of the item at `position`.
    pub fn key_at(&self, position: usize) -> Option<&str> {
        self.keys.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate over lookup keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Iterate over `(key, item)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &T)> {
        self.keys.iter().map(String::as_str).zip(self.items.iter())
    }

    /// Items as a slice, in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a NamedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Named> FromIterator<T> for NamedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.add(item);
        }
        collection
    }
}

impl<T: Named> Extend<T> for NamedCollection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(String);

    impl Named for Item {
        fn name(&self) -> &str {
            &self.0
        }
    }

    fn item(name: &str) -> Item {
        Item(name.to_string())
    }

    #[test]
    fn test_unique_names_keep_their_key() {
        let collection: NamedCollection<Item> =
            [item("ground"), item("walls"), item("decor")].into_iter().collect();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get("walls"), Some(&item("walls")));
        assert_eq!(
            collection.keys().collect::<Vec<_>>(),
            vec!["ground", "walls", "decor"]
        );
    }

    #[test]
    fn test_duplicates_get_counter_suffix() {
        let mut collection = NamedCollection::new();
        assert_eq!(collection.add(item("layer")), "layer");
        assert_eq!(collection.add(item("layer")), "layer0");
        assert_eq!(collection.add(item("layer")), "layer1");

        // Item names are untouched.
        assert!(collection.iter().all(|i| i.0 == "layer"));
    }

    #[test]
    fn test_counters_are_per_name() {
        let mut collection = NamedCollection::new();
        collection.add(item("a"));
        collection.add(item("b"));
        assert_eq!(collection.add(item("a")), "a0");
        assert_eq!(collection.add(item("b")), "b0");
        assert_eq!(collection.add(item("a")), "a1");
    }

    #[test]
    fn test_pathological_collision_inserts_separators() {
        let mut collection = NamedCollection::new();
        collection.add(item("layer0"));
        collection.add(item("layer"));
        assert_eq!(collection.add(item("layer")), "layer_0");

        collection.add(item("layer1"));
        assert_eq!(collection.add(item("layer")), "layer_1");

        collection.add(item("layer2"));
        collection.add(item("layer_2"));
        assert_eq!(collection.add(item("layer")), "layer__2");
    }

    #[test]
    fn test_derived_key_name_collides_later() {
        let mut collection = NamedCollection::new();
        collection.add(item("layer"));
        collection.add(item("layer"));
        // A genuinely named "layer0" now collides with the derived key.
        assert_eq!(collection.add(item("layer0")), "layer00");
    }

    #[test]
    fn test_empty_names() {
        let mut collection = NamedCollection::new();
        assert_eq!(collection.add(item("")), "");
        assert_eq!(collection.add(item("")), "0");
        assert_eq!(collection.add(item("")), "1");
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let names = ["z", "a", "z", "m"];
        let collection: NamedCollection<Item> = names.iter().map(|n| item(n)).collect();

        let seen: Vec<&str> = collection.iter().map(|i| i.0.as_str()).collect();
        assert_eq!(seen, names);
        assert_eq!(collection.key_at(2), Some("z0"));
        assert_eq!(collection.get_index(3), Some(&item("m")));
    }

    #[test]
    fn test_missing_key() {
        let collection: NamedCollection<Item> = [item("a")].into_iter().collect();
        assert!(collection.get("b").is_none());
        assert!(!collection.contains_key("a0"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_keys_are_unique(names in proptest::collection::vec("[ab_0-2]{0,3}", 0..64)) {
                let collection: NamedCollection<Item> = names.iter().map(|n| item(n)).collect();

                let keys: HashSet<&str> = collection.keys().collect();
                prop_assert_eq!(keys.len(), names.len());

                for (key, stored) in collection.entries() {
                    prop_assert_eq!(collection.get(key), Some(stored));
                }
            }
        }
    }
}
