// crates/slotdeck_core/src/table/mod.rs

pub mod config;
pub mod dense_collection;
pub mod error;
pub mod handle_table;
pub mod iter;

pub use config::TableConfig;
pub use dense_collection::DenseCollection;
pub use error::HandleError;
pub use handle_table::HandleTable;
pub use iter::{HandleIter, Iter, IterMut};
