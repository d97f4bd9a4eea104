//! # Error Types
//!
//! Two kinds of failure exist in the UI layer:
//! - [`UiError`]: recoverable, returned from configuration loading
//! - [`ContractViolation`]: a construction-call bug, fatal via [`fatal`]
//!
//! Layout and draw never return errors. A broken tree shape cannot be
//! repaired mid-frame, so violations abort immediately.

use thiserror::Error;

/// Recoverable errors.
#[derive(Error, Debug)]
pub enum UiError {
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML for [`UiConfig`](crate::UiConfig).
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("configuration io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fallible UI operations.
pub type UiResult<T> = Result<T, UiError>;

/// Construction contract broken by the calling code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// A container holds the wrong number of children.
    #[error("{kind} must have {expected} child(ren), found {found}")]
    ChildCount {
        /// Container kind.
        kind: &'static str,
        /// Required count, in words.
        expected: &'static str,
        /// Actual count.
        found: usize,
    },

    /// `push_element` with neither an open parent nor an open sibling.
    #[error("element pushed with no open parent and no previous sibling")]
    NoAttachmentPoint,

    /// A child scope was opened before any element was created in it.
    #[error("child scope opened without an element to attach children to")]
    NoScopeOwner,

    /// Too many nested clip regions.
    #[error("bounding box stack overflow (capacity {capacity})")]
    BoundingBoxOverflow {
        /// Configured capacity.
        capacity: usize,
    },

    /// Popped the root bounding box.
    #[error("bounding box stack underflow")]
    BoundingBoxUnderflow,

    /// A container needed its parent's width but the parent has none yet.
    #[error("{kind} inherits its width but the parent width is unset")]
    UnsetParentWidth {
        /// Container kind.
        kind: &'static str,
    },

    /// An element handle from an earlier frame.
    #[error("element handle belongs to an earlier frame")]
    StaleElement,

    /// A non-root element without a parent to inherit geometry from.
    #[error("{kind} has no parent element")]
    Detached {
        /// Element kind.
        kind: &'static str,
    },
}

/// Aborts on a contract violation.
///
/// # Panics
///
/// Always.
#[cold]
#[track_caller]
pub fn fatal(violation: ContractViolation) -> ! {
    tracing::error!(%violation, "ui contract violation");
    panic!("{violation}");
}
