use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::primitives::{Generation, ReferenceId};

/// A `(reference_id, generation)` pair referring to an item stored in a
/// [`HandleTable`](crate::HandleTable).
///
/// Handles are plain values: copying one carries no ownership of the item.
/// The type parameter only ties the handle to tables of the same item type;
/// equality, ordering and hashing look at the two integers alone.
pub struct Handle<T> {
    reference_id: ReferenceId,
    generation: Generation,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    #[inline]
    pub(crate) fn new(reference_id: ReferenceId, generation: Generation) -> Self {
        Self {
            reference_id,
            generation,
            _marker: PhantomData,
        }
    }

    /// Rebuilds a handle from integers previously taken out with
    /// [`Handle::into_raw_parts`].
    ///
    /// Nothing is checked here; the table validates the handle on use and
    /// reports [`HandleError`](crate::HandleError) for ids it never issued or
    /// generations that no longer match.
    #[inline]
    pub fn from_raw_parts(reference_id: ReferenceId, generation: Generation) -> Self {
        Self::new(reference_id, generation)
    }

    #[inline]
    pub fn into_raw_parts(self) -> (ReferenceId, Generation) {
        (self.reference_id, self.generation)
    }

    #[inline]
    pub fn reference_id(&self) -> ReferenceId {
        self.reference_id
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl<T> Copy for Handle<T> {}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.reference_id == other.reference_id && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reference_id.hash(state);
        self.generation.hash(state);
    }
}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.reference_id, self.generation).cmp(&(other.reference_id, other.generation))
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("reference_id", &self.reference_id)
            .field("generation", &self.generation)
            .finish()
    }
}
