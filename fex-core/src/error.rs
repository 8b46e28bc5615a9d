//! Error types for the document model
//!
//! Allocation failure is the only reportable error. A broken arena link is an
//! internal-consistency violation and terminates the process, see [`fatal`].

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

use crate::targets;

/// Result type for document model operations
pub type ScriptResult<T> = Result<T, ScriptError>;

/// What a failed allocation was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocTarget {
    /// Arena storage for the document itself
    Document,
    /// Slot for a new section in a document
    Section,
    /// Slot for a new entry in a section
    Entry,
    /// Payload buffer of a string entry
    StringPayload { len: usize },
}

impl fmt::Display for AllocTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocTarget::Document => write!(f, "document"),
            AllocTarget::Section => write!(f, "section slot"),
            AllocTarget::Entry => write!(f, "entry slot"),
            AllocTarget::StringPayload { len } => write!(f, "string payload of {} bytes", len),
        }
    }
}

/// Document model error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Storage could not be acquired; the target collection is unchanged
    #[error("allocation failed for {what}: {source}")]
    Alloc {
        what: AllocTarget,
        #[source]
        source: TryReserveError,
    },
}

impl ScriptError {
    pub(crate) fn alloc(what: AllocTarget) -> impl FnOnce(TryReserveError) -> Self {
        move |source| ScriptError::Alloc { what, source }
    }

    /// The allocation target, for callers that want to report it
    pub fn target(&self) -> AllocTarget {
        match self {
            ScriptError::Alloc { what, .. } => *what,
        }
    }
}

/// Internal-consistency violation: log and abort.
///
/// Continuing after a corrupted link risks releasing the wrong node, so this
/// is not a catchable panic.
#[cold]
#[inline(never)]
pub(crate) fn fatal(args: fmt::Arguments<'_>) -> ! {
    tracing::error!(target: targets::ARENA, "internal consistency violation: {}", args);
    eprintln!("fex-core: internal consistency violation: {}", args);
    std::process::abort()
}
