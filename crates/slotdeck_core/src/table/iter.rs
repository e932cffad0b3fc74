use std::iter::FusedIterator;
use std::slice;

use crate::identifiers::handle::Handle;
use crate::identifiers::slot::SlotMeta;

/// Iterator over the live items of a table in storage order
pub struct Iter<'a, T> {
    items: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(items: &'a [T]) -> Self {
        Self { items: items.iter() }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over the live items of a table in storage order
pub struct IterMut<'a, T> {
    items: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(items: &'a mut [T]) -> Self {
        Self { items: items.iter_mut() }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Iterator yielding each live item together with its current handle.
///
/// The iterator borrows the table, so the table cannot be mutated while a
/// traversal is in progress. Handles collected from it are only meaningful
/// for the table state they were read from; removing through them afterwards
/// relocates items and changes storage order.
pub struct HandleIter<'a, T> {
    items: slice::Iter<'a, T>,
    slots: slice::Iter<'a, SlotMeta>,
}

impl<'a, T> HandleIter<'a, T> {
    /// `slots` must be the live prefix of the metadata, aligned with `items`
    #[inline]
    pub(crate) fn new(items: &'a [T], slots: &'a [SlotMeta]) -> Self {
        debug_assert_eq!(items.len(), slots.len());
        Self {
            items: items.iter(),
            slots: slots.iter(),
        }
    }
}

impl<'a, T> Iterator for HandleIter<'a, T> {
    type Item = (Handle<T>, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        let slot = self.slots.next()?;
        Some((slot.handle(), item))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> DoubleEndedIterator for HandleIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.items.next_back()?;
        let slot = self.slots.next_back()?;
        Some((slot.handle(), item))
    }
}

impl<T> ExactSizeIterator for HandleIter<'_, T> {}

impl<T> FusedIterator for HandleIter<'_, T> {}
