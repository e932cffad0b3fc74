// crates/slotdeck_core/src/identifiers/primitives.rs

/// Stable index into the indirection table, never reused for another slot identity
pub type ReferenceId = usize;

/// Physical index into the dense item storage
pub type Position = usize;

/// Per-slot counter bumped every time a slot is vacated or refilled
pub type Generation = u64;
