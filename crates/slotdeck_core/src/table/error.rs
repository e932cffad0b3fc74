use thiserror::Error;

/// Reasons a handle fails to resolve to a live item
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The reference id was never issued by this table: a fabricated handle,
    /// or one taken from another table
    #[error("handle is invalid")]
    Invalid,

    /// The referenced item has been removed; its slot may since hold another item
    #[error("handle has expired")]
    Expired,
}
