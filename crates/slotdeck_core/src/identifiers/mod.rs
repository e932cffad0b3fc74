pub mod primitives;
pub mod handle;
pub(crate) mod slot;
