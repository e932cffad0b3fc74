// crates/slotdeck_core/src/constants.rs

/// Default number of items a table reserves room for on construction.
/// Zero keeps an unused table allocation-free
pub const DEFAULT_INITIAL_CAPACITY: usize = 0;
