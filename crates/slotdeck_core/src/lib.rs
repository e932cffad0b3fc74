//! Dense storage handing out generational handles.
//!
//! [`HandleTable`] keeps its items packed in one contiguous vector and gives
//! each inserted item a [`Handle`]. Handles survive the relocations caused
//! by removing other items, and a handle to a removed item is reported as
//! [`HandleError::Expired`] instead of silently resolving to whatever now
//! occupies its slot.
//!
//! ```
//! use slotdeck_core::{HandleError, HandleTable};
//!
//! let mut table = HandleTable::new();
//! let a = table.insert("a");
//! let b = table.insert("b");
//!
//! assert_eq!(table.remove(a), Ok("a"));
//! assert_eq!(table.get(a), Err(HandleError::Expired));
//! assert_eq!(table.get(b), Ok(&"b"));
//! ```

pub mod constants;
pub mod identifiers;
pub mod table;

pub use identifiers::handle::Handle;
pub use identifiers::primitives::{Generation, Position, ReferenceId};
pub use table::{DenseCollection, HandleError, HandleIter, HandleTable, Iter, IterMut, TableConfig};
