use crate::constants::DEFAULT_INITIAL_CAPACITY;

/// Construction parameters for a [`HandleTable`](super::HandleTable).
/// They only steer pre-allocation, never behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Items to reserve room for up front
    pub initial_capacity: usize,
}

impl TableConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
