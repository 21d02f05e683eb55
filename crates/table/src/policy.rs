//! Existence-sensitive row policies

use strum_macros::{Display, EnumString};

/// How `insert` treats an existing row
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OverwritePolicy {
    /// Create only; an existing row is `AlreadyExists`
    FailBeforeOverwrite,
    /// Update only; a missing row is `NotFound`
    FailUnlessOverwrite,
    /// Upsert; never fails on presence
    DontFailUponOverwrite,
}

impl OverwritePolicy {
    /// Whether writing is allowed given the current presence of the row
    pub fn permits(&self, row_exists: bool) -> bool {
        match self {
            OverwritePolicy::FailBeforeOverwrite => !row_exists,
            OverwritePolicy::FailUnlessOverwrite => row_exists,
            OverwritePolicy::DontFailUponOverwrite => true,
        }
    }
}

/// How `get` and `delete` treat a missing row
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Presence {
    /// A missing row is `NotFound`
    FailIfMissing,
    /// A missing row is reported as `None`
    AllowMissing,
}
