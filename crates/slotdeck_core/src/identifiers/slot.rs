use super::handle::Handle;
use super::primitives::{Generation, ReferenceId};

/// Metadata stored for every storage position, live or freed.
/// Records which reference id owns the position and its current generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotMeta {
    reference_id: ReferenceId,
    generation: Generation,
}

impl SlotMeta {
    #[inline(always)]
    pub(crate) fn new(reference_id: ReferenceId, generation: Generation) -> Self {
        Self { reference_id, generation }
    }

    #[inline(always)]
    pub(crate) fn reference_id(&self) -> ReferenceId {
        self.reference_id
    }

    #[inline(always)]
    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    /// Increments the generation counter, wrapping around if necessary
    #[inline(always)]
    pub(crate) fn increment_generation(&mut self) -> Generation {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// The handle currently identifying this slot
    #[inline(always)]
    pub(crate) fn handle<T>(&self) -> Handle<T> {
        Handle::new(self.reference_id, self.generation)
    }
}
