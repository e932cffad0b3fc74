// crates/slotdeck_core/src/table/handle_table.rs

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use super::config::TableConfig;
use super::dense_collection::DenseCollection;
use super::error::HandleError;
use super::iter::{HandleIter, Iter, IterMut};
use crate::identifiers::handle::Handle;
use crate::identifiers::primitives::Position;
use crate::identifiers::slot::SlotMeta;

/// Contiguous storage addressed through generational handles.
///
/// Three parallel vectors back the table:
/// * `data` holds the live items with no gaps,
/// * `meta` records, per storage position, the reference id owning it and the
///   position's generation. Positions past `data.len()` are freed slots
///   waiting for reuse,
/// * `indices` maps every reference id ever issued to its current position.
///
/// Removal swaps the removed item with the last live one, so freed slots
/// always form a contiguous run at the tail of `meta`. Insertion reuses the
/// first slot of that run, which is the most recently freed one.
///
/// Every operation except [`clear`](Self::clear) runs in amortized O(1).
/// Generations use wrapping arithmetic: a handle kept across 2^64 reuses of
/// its slot would validate again.
#[derive(Clone)]
pub struct HandleTable<T> {
    data: Vec<T>,
    meta: Vec<SlotMeta>,
    indices: Vec<Position>,
}

impl<T> HandleTable<T> {
    /// Creates an empty table with the default configuration
    #[inline]
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty table with room for `capacity` items
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            meta: Vec::with_capacity(capacity),
            indices: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Stores `item` and returns a handle to it. Never fails
    pub fn insert(&mut self, item: T) -> Handle<T> {
        let position = self.data.len();
        self.data.push(item);

        // Reuse the most recently freed slot; its indirection entry already
        // points at this position
        if let Some(slot) = self.meta.get_mut(position) {
            slot.increment_generation();
            log::trace!(
                "reusing slot {} for reference id {} at generation {}",
                position,
                slot.reference_id(),
                slot.generation()
            );
            return slot.handle();
        }

        self.meta.push(SlotMeta::new(position, 0));
        self.indices.push(position);
        Handle::new(position, 0)
    }

    /// Returns the current storage position of the item behind `handle`
    pub fn resolve(&self, handle: Handle<T>) -> Result<Position, HandleError> {
        let position = *self
            .indices
            .get(handle.reference_id())
            .ok_or(HandleError::Invalid)?;

        // A freed slot is never live, even when the handle was rebuilt with
        // the slot's current generation
        if position >= self.data.len() || self.meta[position].generation() != handle.generation() {
            return Err(HandleError::Expired);
        }

        Ok(position)
    }

    #[inline]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.resolve(handle).is_ok()
    }

    #[inline]
    pub fn get(&self, handle: Handle<T>) -> Result<&T, HandleError> {
        let position = self.resolve(handle)?;
        Ok(&self.data[position])
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, HandleError> {
        let position = self.resolve(handle)?;
        Ok(&mut self.data[position])
    }

    /// Replaces the item behind `handle`, returning the previous value
    #[inline]
    pub fn set(&mut self, handle: Handle<T>, value: T) -> Result<T, HandleError> {
        let position = self.resolve(handle)?;
        Ok(mem::replace(&mut self.data[position], value))
    }

    /// Removes the item behind `handle` and returns it.
    ///
    /// The last live item moves into the vacated position; its handle keeps
    /// resolving. `handle` and all copies of it expire. Nothing changes when
    /// the handle does not resolve.
    pub fn remove(&mut self, handle: Handle<T>) -> Result<T, HandleError> {
        let removed = self.resolve(handle)?;
        let last = self.data.len() - 1;

        if removed != last {
            self.meta.swap(removed, last);
            let moved_id = self.meta[removed].reference_id();
            self.indices.swap(handle.reference_id(), moved_id);
            log::trace!(
                "reference id {} relocated from {} to {}",
                moved_id,
                last,
                removed
            );
        }

        self.meta[last].increment_generation();
        Ok(self.data.swap_remove(removed))
    }

    /// Removes and returns the item in the last storage position, which is
    /// not necessarily the most recently inserted one.
    ///
    /// # Panics
    /// Panics if the table is empty.
    pub fn pop(&mut self) -> T {
        self.try_pop().expect("pop called on an empty handle table")
    }

    /// Like [`pop`](Self::pop), returning `None` on an empty table
    pub fn try_pop(&mut self) -> Option<T> {
        let last = self.data.len().checked_sub(1)?;
        self.meta[last].increment_generation();
        self.data.pop()
    }

    /// Handle of the item currently stored at `position`
    #[inline]
    pub fn handle_at(&self, position: Position) -> Option<Handle<T>> {
        if position < self.data.len() {
            Some(self.meta[position].handle())
        } else {
            None
        }
    }

    /// Removes every item. All outstanding handles expire and every slot
    /// joins the free run; reference ids are kept for reuse.
    pub fn clear(&mut self) {
        let live = self.data.len();
        for slot in &mut self.meta[..live] {
            slot.increment_generation();
        }
        self.data.clear();
        log::debug!("cleared {} items, {} slots free", live, self.meta.len());
    }

    /// Reserves room for at least `additional` more items. Slots already in
    /// the free run count towards the metadata reservation
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
        let fresh = additional.saturating_sub(self.free_slots());
        self.meta.reserve(fresh);
        self.indices.reserve(fresh);
        log::debug!(
            "reserved {} items ({} new slots), capacity now {}",
            additional,
            fresh,
            self.data.capacity()
        );
    }

    /// Number of live items
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of items the table can hold without reallocating its item storage
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Number of reference ids ever issued
    #[inline(always)]
    pub fn slot_count(&self) -> usize {
        self.meta.len()
    }

    /// Freed slots waiting for reuse
    #[inline(always)]
    pub fn free_slots(&self) -> usize {
        self.meta.len() - self.data.len()
    }

    /// Live items in storage order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates live items in storage order. Storage order is not insertion
    /// order once anything has been removed
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.data)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.data)
    }

    /// Iterates live items in storage order along with their handles
    #[inline]
    pub fn iter_with_handles(&self) -> HandleIter<'_, T> {
        HandleIter::new(&self.data, &self.meta[..self.data.len()])
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> Index<Handle<T>> for HandleTable<T> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &Self::Output {
        match self.get(handle) {
            Ok(item) => item,
            Err(err) => panic!("cannot index handle table with {handle:?}: {err}"),
        }
    }
}

impl<T> IndexMut<Handle<T>> for HandleTable<T> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut Self::Output {
        match self.get_mut(handle) {
            Ok(item) => item,
            Err(err) => panic!("cannot index handle table with {handle:?}: {err}"),
        }
    }
}

impl<T> DenseCollection<Handle<T>, T> for HandleTable<T> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn slot_len(&self) -> usize {
        self.meta.len()
    }
}

impl<'a, T> IntoIterator for &'a HandleTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut HandleTable<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks the structural invariants through the private fields
    fn assert_consistent<T>(table: &HandleTable<T>) {
        assert!(table.data.len() <= table.meta.len());
        assert_eq!(table.meta.len(), table.indices.len());
        for (position, slot) in table.meta.iter().enumerate() {
            assert_eq!(table.indices[slot.reference_id()], position);
        }
    }

    #[test]
    fn insert_remove_reuse_scenario() {
        let mut table = HandleTable::new();
        let h1 = table.insert(10);
        let h2 = table.insert(20);
        let h3 = table.insert(30);
        assert_eq!(table.as_slice(), &[10, 20, 30]);

        assert_eq!(table.remove(h2), Ok(20));
        assert_eq!(table.as_slice(), &[10, 30]);

        let h4 = table.insert(40);
        assert_eq!(table.as_slice(), &[10, 30, 40]);
        assert_eq!(h4.reference_id(), h2.reference_id());
        assert_eq!(h4.generation(), 2);

        assert_eq!(table.get(h3), Ok(&30));
        assert_eq!(table.remove(h1), Ok(10));
        assert_eq!(table.as_slice(), &[40, 30]);
        assert_consistent(&table);
    }

    #[test]
    fn removed_handle_expires_everywhere() {
        let mut table = HandleTable::new();
        let handle = table.insert("gone");
        table.insert("kept");

        assert_eq!(table.remove(handle), Ok("gone"));
        assert_eq!(table.get(handle), Err(HandleError::Expired));
        assert_eq!(table.get_mut(handle), Err(HandleError::Expired));
        assert_eq!(table.set(handle, "again"), Err(HandleError::Expired));
        assert_eq!(table.remove(handle), Err(HandleError::Expired));
        assert!(!table.contains(handle));
        assert_eq!(table.as_slice(), &["kept"]);
    }

    #[test]
    fn expired_handle_stays_expired_after_slot_reuse() {
        let mut table = HandleTable::new();
        let old = table.insert(1);
        table.remove(old).unwrap();
        let new = table.insert(2);

        assert_eq!(new.reference_id(), old.reference_id());
        assert!(new.generation() > old.generation());
        assert_eq!(table.get(old), Err(HandleError::Expired));
        assert_eq!(table.get(new), Ok(&2));
    }

    #[test]
    fn never_issued_ids_are_invalid() {
        let mut table: HandleTable<u8> = HandleTable::with_capacity(4);
        assert_eq!(table.get(Handle::from_raw_parts(0, 0)), Err(HandleError::Invalid));

        table.insert(1);
        let foreign = Handle::from_raw_parts(table.capacity() + 1, 0);
        assert_eq!(table.get(foreign), Err(HandleError::Invalid));
        assert_eq!(table.set(foreign, 9), Err(HandleError::Invalid));
        assert_eq!(table.remove(foreign), Err(HandleError::Invalid));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rebuilt_handle_to_freed_slot_is_expired() {
        let mut table = HandleTable::new();
        let handle = table.insert('x');
        table.remove(handle).unwrap();

        // The freed slot now carries generation 1; a handle claiming it must
        // not reach past the live items
        let forged = Handle::from_raw_parts(handle.reference_id(), 1);
        assert_eq!(table.get(forged), Err(HandleError::Expired));
    }

    #[test]
    fn removal_keeps_other_handles_valid() {
        let mut table = HandleTable::new();
        let handles: Vec<_> = (0..8).map(|i| table.insert(i * 100)).collect();

        table.remove(handles[2]).unwrap();
        table.remove(handles[0]).unwrap();
        table.remove(handles[7]).unwrap();

        for (i, handle) in handles.iter().enumerate() {
            match i {
                0 | 2 | 7 => assert_eq!(table.get(*handle), Err(HandleError::Expired)),
                _ => assert_eq!(table.get(*handle), Ok(&(i * 100))),
            }
        }
        assert_eq!(table.len(), 5);
        assert_eq!(table.free_slots(), 3);
        assert_consistent(&table);
    }

    #[test]
    fn freed_slots_are_reused_last_freed_first() {
        let mut table = HandleTable::new();
        let handles: Vec<_> = (0..5).map(|i| table.insert(i)).collect();

        // h1's slot was freed last, so it is refilled first
        table.remove(handles[4]).unwrap();
        table.remove(handles[3]).unwrap();
        table.remove(handles[1]).unwrap();

        let reused: Vec<_> = (10..13).map(|i| table.insert(i)).collect();
        let reused_ids: Vec<_> = reused.iter().map(|h| h.reference_id()).collect();
        assert_eq!(
            reused_ids,
            vec![
                handles[1].reference_id(),
                handles[3].reference_id(),
                handles[4].reference_id()
            ]
        );
        for handle in &reused {
            assert_eq!(handle.generation(), 2);
        }
        assert_eq!(table.slot_count(), 5);
        assert_eq!(table.free_slots(), 0);
        assert_consistent(&table);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut table = HandleTable::new();
        let handle = table.insert(String::from("before"));
        assert_eq!(table.get(handle).map(String::as_str), Ok("before"));

        let previous = table.set(handle, String::from("after")).unwrap();
        assert_eq!(previous, "before");
        assert_eq!(table[handle], "after");

        table[handle].push('!');
        table.get_mut(handle).unwrap().push('?');
        assert_eq!(table.get(handle).map(String::as_str), Ok("after!?"));
    }

    #[test]
    fn pop_takes_the_last_storage_position() {
        let mut table = HandleTable::new();
        let a = table.insert('a');
        let b = table.insert('b');
        let c = table.insert('c');
        table.remove(a).unwrap();
        // storage is now [c, b]

        assert_eq!(table.pop(), 'b');
        assert_eq!(table.get(b), Err(HandleError::Expired));
        assert_eq!(table.get(c), Ok(&'c'));
        assert_eq!(table.try_pop(), Some('c'));
        assert_eq!(table.try_pop(), None);
        assert_consistent(&table);
    }

    #[test]
    #[should_panic(expected = "empty handle table")]
    fn pop_on_empty_table_panics() {
        let mut table: HandleTable<u32> = HandleTable::new();
        table.pop();
    }

    #[test]
    #[should_panic(expected = "handle has expired")]
    fn indexing_with_expired_handle_panics() {
        let mut table = HandleTable::new();
        let handle = table.insert(1);
        table.remove(handle).unwrap();
        let _value = table[handle];
    }

    #[test]
    fn clear_expires_everything_and_recycles_slots() {
        let mut table = HandleTable::new();
        let handles: Vec<_> = (0..4).map(|i| table.insert(i)).collect();
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.free_slots(), 4);
        for handle in &handles {
            assert_eq!(table.get(*handle), Err(HandleError::Expired));
        }

        let fresh = table.insert(99);
        assert!(fresh.reference_id() < 4);
        assert_eq!(table.slot_count(), 4);
        assert_eq!(table.get(fresh), Ok(&99));
        assert_consistent(&table);
    }

    #[test]
    fn iteration_follows_storage_order() {
        let mut table = HandleTable::new();
        let a = table.insert(1);
        table.insert(2);
        table.insert(3);
        table.remove(a).unwrap();

        let items: Vec<_> = table.iter().copied().collect();
        assert_eq!(items, vec![3, 2]);

        // Each traversal starts over
        assert_eq!(table.iter().count(), 2);
        assert_eq!(table.iter().next(), Some(&3));

        for (handle, item) in table.iter_with_handles() {
            assert_eq!(table.get(handle), Ok(item));
        }

        for item in &mut table {
            *item *= 10;
        }
        assert_eq!(table.as_slice(), &[30, 20]);
    }

    #[test]
    fn handle_at_reports_live_positions_only() {
        let mut table = HandleTable::new();
        let a = table.insert("a");
        let b = table.insert("b");
        table.remove(a).unwrap();

        assert_eq!(table.handle_at(0), Some(b));
        assert_eq!(table.resolve(b), Ok(0));
        assert_eq!(table.handle_at(1), None);
    }

    #[test]
    fn reserve_and_config_only_touch_capacity() {
        let config = TableConfig::new().with_initial_capacity(16);
        let mut table: HandleTable<u64> = HandleTable::with_config(config);
        assert!(table.capacity() >= 16);
        assert!(table.is_empty());

        table.reserve(64);
        assert!(table.capacity() >= 64);
        assert_eq!(table.slot_count(), 0);
        assert_eq!(DenseCollection::slot_len(&table), 0);
    }

    #[test]
    fn debug_lists_live_items() {
        let mut table = HandleTable::new();
        let a = table.insert(1);
        table.insert(2);
        table.remove(a).unwrap();
        assert_eq!(format!("{table:?}"), "[2]");
    }
}
