use std::ops::{Index, IndexMut};

/// A collection keeping its values packed while addressing them through keys
/// that stay valid across relocation
pub trait DenseCollection<K, V>: Index<K, Output = V> + IndexMut<K, Output = V> {
    /// Returns the number of live elements in the collection
    fn len(&self) -> usize;

    /// Returns the number of slots ever allocated, live or free
    fn slot_len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
